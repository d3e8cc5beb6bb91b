use indexmap::IndexMap;
use serde_json::Value;

/// Industry a comment belongs to, sent to `comment_tag` as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CommentType {
    Hotel = 1,
    Ktv = 2,
    Beauty = 3,
    /// Food and dining. The server falls back to this one.
    #[default]
    Food = 4,
    Travel = 5,
    Health = 6,
    Education = 7,
    Business = 8,
    RealEstate = 9,
    Car = 10,
    Life = 11,
    Shopping = 12,
    /// Computers, communication and consumer electronics.
    Electronics = 13,
}

impl CommentType {
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

/// Model used by `simnet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimnetModel {
    #[default]
    Bow,
    Cnn,
    Grnn,
}

impl SimnetModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimnetModel::Bow => "BOW",
            SimnetModel::Cnn => "CNN",
            SimnetModel::Grnn => "GRNN",
        }
    }
}

/// Conversation scene hint for `emotion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmotionScene {
    #[default]
    Default,
    /// Small talk
    Talk,
    /// Task oriented dialogue, e.g. navigation
    Task,
    /// Customer service conversations
    CustomerService,
}

impl EmotionScene {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionScene::Default => "default",
            EmotionScene::Talk => "talk",
            EmotionScene::Task => "task",
            EmotionScene::CustomerService => "customer_service",
        }
    }
}

/// Optional body fields merged after an operation's required fields.
///
/// The typed setters cover the options the API documents. [`NlpOptions::param`] passes
/// anything else through untouched. Keys are never checked against the operation, and
/// a key that repeats a required field overwrites it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NlpOptions {
    params: IndexMap<String, Value>,
}

impl NlpOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// `dep_parser`: 0 selects the web model, 1 the query model.
    /// `word_sim_embedding`: reserved, only 0 is supported.
    pub fn mode(self, mode: u32) -> Self {
        self.param("mode", mode)
    }

    /// `simnet` model, BOW by default.
    pub fn model(self, model: SimnetModel) -> Self {
        self.param("model", model.as_str())
    }

    /// `comment_tag` industry. Overrides the required `type` field.
    pub fn comment_type(self, comment_type: CommentType) -> Self {
        self.param("type", comment_type.ordinal())
    }

    /// `emotion` conversation scene.
    pub fn scene(self, scene: EmotionScene) -> Self {
        self.param("scene", scene.as_str())
    }

    /// `news_summary` article title, at most 200 characters.
    pub fn title<S: Into<String>>(self, title: S) -> Self {
        self.param("title", title.into())
    }

    pub fn param<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.params.iter()
    }
}

impl<'a> IntoIterator for &'a NlpOptions {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for NlpOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(NlpOptions::new(), |options, (k, v)| options.param(k, v))
    }
}
