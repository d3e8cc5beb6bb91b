/// Every endpoint of the NLP API, with its path and the body fields it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Lexer,
    LexerCustom,
    DepParser,
    WordEmbedding,
    DnnlmCn,
    WordSimEmbedding,
    Simnet,
    CommentTag,
    SentimentClassify,
    Keyword,
    Topic,
    Ecnet,
    Emotion,
    NewsSummary,
    TxtKeywordsExtraction,
}

impl Operation {
    pub const ALL: [Operation; 15] = [
        Operation::Lexer,
        Operation::LexerCustom,
        Operation::DepParser,
        Operation::WordEmbedding,
        Operation::DnnlmCn,
        Operation::WordSimEmbedding,
        Operation::Simnet,
        Operation::CommentTag,
        Operation::SentimentClassify,
        Operation::Keyword,
        Operation::Topic,
        Operation::Ecnet,
        Operation::Emotion,
        Operation::NewsSummary,
        Operation::TxtKeywordsExtraction,
    ];

    pub fn uri(&self) -> &'static str {
        match self {
            Operation::Lexer => "/rpc/2.0/nlp/v1/lexer",
            Operation::LexerCustom => "/rpc/2.0/nlp/v1/lexer_custom",
            Operation::DepParser => "/rpc/2.0/nlp/v1/depparser",
            Operation::WordEmbedding => "/rpc/2.0/nlp/v2/word_emb_vec",
            Operation::DnnlmCn => "/rpc/2.0/nlp/v2/dnnlm_cn",
            Operation::WordSimEmbedding => "/rpc/2.0/nlp/v2/word_emb_sim",
            Operation::Simnet => "/rpc/2.0/nlp/v2/simnet",
            Operation::CommentTag => "/rpc/2.0/nlp/v2/comment_tag",
            Operation::SentimentClassify => "/rpc/2.0/nlp/v1/sentiment_classify",
            Operation::Keyword => "/rpc/2.0/nlp/v1/keyword",
            Operation::Topic => "/rpc/2.0/nlp/v1/topic",
            Operation::Ecnet => "/rpc/2.0/nlp/v1/ecnet",
            Operation::Emotion => "/rpc/2.0/nlp/v1/emotion",
            Operation::NewsSummary => "/rpc/2.0/nlp/v1/news_summary",
            Operation::TxtKeywordsExtraction => "/rpc/2.0/nlp/v1/txt_keywords_extraction",
        }
    }

    /// Required body fields, in the order they are written.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Operation::Lexer
            | Operation::LexerCustom
            | Operation::DepParser
            | Operation::DnnlmCn
            | Operation::SentimentClassify
            | Operation::Ecnet
            | Operation::Emotion => &["text"],
            Operation::WordEmbedding => &["word"],
            Operation::WordSimEmbedding => &["word_1", "word_2"],
            Operation::Simnet => &["text_1", "text_2"],
            Operation::CommentTag => &["text", "type"],
            Operation::Keyword | Operation::Topic => &["title", "content"],
            Operation::NewsSummary => &["content", "max_summary_len"],
            Operation::TxtKeywordsExtraction => &["text", "num"],
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The last path segment doubles as the operation name
        let name = self.uri().rsplit('/').next().unwrap_or_default();
        write!(f, "{name}")
    }
}
