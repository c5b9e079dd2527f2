use async_trait::async_trait;
use lambda_runtime::tracing::info;
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::Value;

use super::Capability;
use crate::context::AppContext;
use crate::models::article::{ArticleRequest, ArticleResponse};
use crate::models::error::{ProcessingError, ValidationError};
use crate::models::openai::ChatMessage;

const TEMPERATURE: f32 = 0.9;
const MAX_TOKENS: u32 = 300;

/// Topics an article can be generated about.
pub const TOPICS: [&str; 20] = [
    "The impact of artificial intelligence on daily life",
    "How climate change affects our planet",
    "The importance of learning a second language",
    "The benefits of regular exercise",
    "How to improve your time management skills",
    "The history and significance of space exploration",
    "The effects of social media on mental health",
    "Why sleep is essential for a healthy life",
    "The role of technology in education",
    "The power of positive thinking",
    "How music influences our emotions",
    "The importance of recycling and waste management",
    "The future of electric vehicles",
    "How to build healthy eating habits",
    "The benefits of reading books regularly",
    "The science behind human emotions",
    "The cultural impact of globalization",
    "How mindfulness can improve your daily life",
    "The evolution of the internet and its influence",
    "The significance of renewable energy sources",
];

const SYSTEM_PROMPT: &str = "You are a creative and engaging English article generator, \
    specializing in making learning fun and memorable. Craft compelling, well-structured \
    content that captivates the reader, using vivid examples, analogies, and storytelling \
    techniques. Your writing should feel dynamic and immersive, sparking curiosity and \
    making complex topics easy to grasp.";

/// Writes a short reading-practice article about a random topic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleGenerator;

impl ArticleGenerator {
    /// Picks a topic uniformly at random from [`TOPICS`].
    pub fn pick_topic<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
        TOPICS.choose(rng).copied().unwrap_or(TOPICS[0])
    }

    fn prompt(topic: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Write a short-length article (two paragraphs) about the topic: **{topic}**. \
                 The article should be informative and engaging, suitable for English \
                 learning purposes. Format the response using structured text with clear \
                 sections, headings, and bold or italicized keywords. Use Markdown or \
                 another structured text format to enhance readability."
            )),
        ]
    }
}

#[async_trait]
impl Capability for ArticleGenerator {
    type Request = ArticleRequest;
    type Response = ArticleResponse;

    const NAME: &'static str = "article_generator";
    const ALLOWED_METHODS: &'static str = "GET,POST,OPTIONS";

    // Takes no input
    fn validate(&self, _body: &Value) -> Result<ArticleRequest, ValidationError> {
        Ok(ArticleRequest::default())
    }

    async fn process(
        &self,
        ctx: &AppContext,
        _request: ArticleRequest,
    ) -> Result<ArticleResponse, ProcessingError> {
        let topic = Self::pick_topic(&mut rand::thread_rng());
        info!(topic = %topic, "Generating article");

        let article = ctx
            .complete(Self::prompt(topic), TEMPERATURE, Some(MAX_TOKENS))
            .await?;

        Ok(ArticleResponse {
            topic: topic.to_string(),
            article,
        })
    }
}
