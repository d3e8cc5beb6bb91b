pub mod builder;
pub mod operation;
pub mod options;

use crate::api::{
    AipConfigTrait, AipRequest, ApiClient, BaseClient, BodyFormat, Charset, ClientError,
    CONTENT_ENCODING, CONTENT_TYPE, JSON_DATA,
};
use builder::NlpClientBuilder;
use options::{CommentType, NlpOptions};
use serde_json::Value;
use std::sync::Arc;

pub use operation::Operation;

/// Client for the NLP endpoints. Every method sends one request and returns the
/// server's JSON answer as is, error objects included.
///
/// Input limits quoted on the methods are the server's. They are not checked locally.
pub struct NlpClient<B: BaseClient = ApiClient> {
    base: Arc<B>,
}

impl<B: BaseClient> Clone for NlpClient<B> {
    fn clone(&self) -> Self {
        Self {
            base: Arc::clone(&self.base),
        }
    }
}

impl NlpClient<ApiClient> {
    /// Builds a client from explicit credentials, the way the console hands them out.
    pub fn new<S: Into<String>>(app_id: S, api_key: S, secret_key: S) -> crate::Result<Self> {
        NlpClientBuilder::default()
            .with_app_id(app_id)
            .with_api_key(api_key)
            .with_secret_key(secret_key)
            .init()
    }

    pub fn app_id(&self) -> Option<&str> {
        self.base.app_id()
    }
}

impl<B: BaseClient> NlpClient<B> {
    pub fn with_base(base: B) -> Self {
        Self {
            base: Arc::new(base),
        }
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    async fn dispatch(
        &self,
        operation: Operation,
        required: Vec<Option<Value>>,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        crate::debug!("Calling {}", operation);
        let mut request = AipRequest::new();
        self.base.pre_operation(&mut request).await?;
        describe_request(&mut request, operation, required, options);
        self.base.post_operation(&mut request).await?;
        self.base.request_server(request).await
    }

    /// Lexical analysis: word segmentation, part of speech tagging and named entity
    /// recognition. `text` is at most 65536 bytes.
    pub async fn lexer(
        &self,
        text: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(Operation::Lexer, vec![Some(text.into())], options)
            .await
    }

    /// Lexical analysis against the custom dictionary configured in the console.
    pub async fn lexer_custom(
        &self,
        text: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(Operation::LexerCustom, vec![Some(text.into())], options)
            .await
    }

    /// Dependency parsing. `text` is at most 256 bytes.
    ///
    /// Options: [`NlpOptions::mode`], 0 for the web model (default) or 1 for the query model.
    pub async fn dep_parser(
        &self,
        text: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(Operation::DepParser, vec![Some(text.into())], options)
            .await
    }

    /// Vector representation of a single word, at most 64 bytes.
    pub async fn word_embedding(
        &self,
        word: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(Operation::WordEmbedding, vec![Some(word.into())], options)
            .await
    }

    /// DNN language model: segments `text` (at most 512 bytes) and scores how likely
    /// each word is in context.
    pub async fn dnnlm_cn(
        &self,
        text: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(Operation::DnnlmCn, vec![Some(text.into())], options)
            .await
    }

    /// Semantic similarity of two words, each at most 64 bytes.
    pub async fn word_sim_embedding(
        &self,
        word_1: &str,
        word_2: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(
            Operation::WordSimEmbedding,
            vec![Some(word_1.into()), Some(word_2.into())],
            options,
        )
        .await
    }

    /// Similarity score of two short texts, each at most 512 bytes.
    ///
    /// Options: [`NlpOptions::model`].
    pub async fn simnet(
        &self,
        text_1: &str,
        text_2: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(
            Operation::Simnet,
            vec![Some(text_1.into()), Some(text_2.into())],
            options,
        )
        .await
    }

    /// Extracts the aspects and opinions of a review (at most 10240 bytes).
    /// `comment_type` is sent as its ordinal.
    pub async fn comment_tag(
        &self,
        text: &str,
        comment_type: CommentType,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(
            Operation::CommentTag,
            vec![Some(text.into()), Some(comment_type.ordinal().into())],
            options,
        )
        .await
    }

    /// Positive, negative or neutral polarity with confidence. `text` is at most 102400 bytes.
    pub async fn sentiment_classify(
        &self,
        text: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(Operation::SentimentClassify, vec![Some(text.into())], options)
            .await
    }

    /// Content tags for an article. `title` at most 80 bytes, `content` at most 65535.
    pub async fn keyword(
        &self,
        title: &str,
        content: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(
            Operation::Keyword,
            vec![Some(title.into()), Some(content.into())],
            options,
        )
        .await
    }

    /// Topic classification of an article. Same limits as [`NlpClient::keyword`].
    pub async fn topic(
        &self,
        title: &str,
        content: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(
            Operation::Topic,
            vec![Some(title.into()), Some(content.into())],
            options,
        )
        .await
    }

    /// Text correction, `text` is at most 511 bytes.
    pub async fn ecnet(
        &self,
        text: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(Operation::Ecnet, vec![Some(text.into())], options)
            .await
    }

    /// Emotion of a conversation turn, `text` is at most 512 bytes.
    ///
    /// Options: [`NlpOptions::scene`].
    pub async fn emotion(
        &self,
        text: &str,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(Operation::Emotion, vec![Some(text.into())], options)
            .await
    }

    /// Summary of a news article of under 3000 characters, at most `max_summary_len`
    /// characters long. Separate paragraphs with `\n`.
    ///
    /// Options: [`NlpOptions::title`].
    pub async fn news_summary(
        &self,
        content: &str,
        max_summary_len: u32,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(
            Operation::NewsSummary,
            vec![Some(content.into()), Some(max_summary_len.into())],
            options,
        )
        .await
    }

    /// Keyword extraction. Without `num` every keyword found is returned.
    pub async fn txt_keywords_extraction(
        &self,
        text: &str,
        num: Option<u32>,
        options: Option<&NlpOptions>,
    ) -> Result<Value, ClientError> {
        self.dispatch(
            Operation::TxtKeywordsExtraction,
            vec![Some(text.into()), num.map(Value::from)],
            options,
        )
        .await
    }
}

/// Writes an operation's fields, target and encoding onto a request. Required fields
/// come first in table order, absent ones are skipped, then the options are merged.
pub(crate) fn describe_request(
    request: &mut AipRequest,
    operation: Operation,
    required: Vec<Option<Value>>,
    options: Option<&NlpOptions>,
) {
    debug_assert_eq!(required.len(), operation.required_fields().len());
    for (field, value) in operation.required_fields().iter().zip(required) {
        if let Some(value) = value {
            request.add_body(*field, value);
        }
    }
    if let Some(options) = options {
        request.add_body_map(options);
    }
    request
        .set_uri(operation.uri())
        .add_header(CONTENT_ENCODING, Charset::Gbk.as_str())
        .add_header(CONTENT_TYPE, JSON_DATA)
        .set_body_format(BodyFormat::RawJson);
}
