//! Retrieval-augmented answering: embed the question, search the knowledge
//! index, ground one completion call in the retrieved chunks.
//!
//! The three provider traits use native async fn in traits (RPITIT, Rust
//! 2024 edition). Implementations live in aeroguide-infra (`GeminiCompletion`,
//! `GeminiEmbedder`, `PineconeIndex`); tests substitute fixed fakes.

use aeroguide_types::chat::{ChatTurn, Lang};
use aeroguide_types::error::UpstreamError;
use aeroguide_types::llm::{CompletionOutcome, CompletionRequest, KnowledgeChunk};
use aeroguide_types::wire::SourceContext;

use crate::gazetteer::Gazetteer;

/// Stands in for retrieved context when the index returns no matches.
pub const CONTEXT_FALLBACK: &str = "Brak informacji w bazie wiedzy na ten temat.";

/// Separator between retrieved chunks in the grounding block.
const CHUNK_SEPARATOR: &str = "\n\n---\n\n";

pub(crate) const PERSONA: &str = "You are a friendly and helpful AI assistant ✈️ for Edinburgh Airport (EDI), and the airport is the only place we talk about. Keep the conversation pleasant and useful, and use emoji to make your answers friendlier!";

/// Trait for text-generation backends.
pub trait CompletionModel: Send + Sync {
    /// Model identifier, for logs.
    fn name(&self) -> &str;

    /// One full completion round trip.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionOutcome, UpstreamError>> + Send;
}

/// Trait for text-embedding backends.
pub trait TextEmbedder: Send + Sync {
    /// Output vector width.
    fn dimension(&self) -> usize;

    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, UpstreamError>> + Send;
}

/// Trait for vector-similarity knowledge stores.
pub trait KnowledgeIndex: Send + Sync {
    /// Nearest chunks for a query vector, best match first.
    fn search(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<KnowledgeChunk>, UpstreamError>> + Send;
}

/// A grounded answer plus the attribution the wire reply carries.
#[derive(Debug, Clone, PartialEq)]
pub struct RagAnswer {
    pub text: String,
    pub source: Option<SourceContext>,
    pub image_url: Option<String>,
}

pub(crate) fn language_directive(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Your answer must be in English.",
        Lang::Pl => "Twoja odpowiedź musi być w języku polskim.",
    }
}

/// The grounded-answer system instruction: persona, golden rules, language
/// directive, and the retrieved context block.
pub fn answer_system_instruction(context: &str, lang: Lang) -> String {
    let directive = language_directive(lang);
    format!(
        "{PERSONA}\n\n\
         Your golden rules:\n\
         1. BE FRIENDLY AND CONCISE: answer briefly, on topic and in a warm tone. Use emoji where they fit.\n\
         2. IF YOU DO NOT KNOW: when the knowledge-base context is not enough to answer, your only allowed reply is:\n\
         (PL) \"Hmm, nie jestem pewien tej informacji 🤔. Najlepiej sprawdzić to na oficjalnej stronie lotniska: [Strona Główna Lotniska w Edynburgu](https://www.edinburghairport.com/) 🌐\"\n\
         (EN) \"Hmm, I'm not sure about that information 🤔. The best place to check is the official airport website: [Edinburgh Airport Homepage](https://www.edinburghairport.com/) 🌐\"\n\
         3. STICK TO THE FACTS: beyond the rules above, your answers MUST follow directly from the knowledge-base context.\n\
         4. NO FORMATTING: never use Markdown formatting characters such as asterisks (*), except links written as [text](URL).\n\n\
         {directive}\n\n\
         ---\n\
         KNOWLEDGE-BASE CONTEXT (your only source of truth):\n\
         {context}\n\
         ---"
    )
}

/// Answer an informational question against the knowledge base.
///
/// Attribution rules: the first retrieved chunk becomes the source context,
/// except when the trimmed answer ends with `'?'` (the model asked a
/// clarifying question instead of answering, so nothing was actually cited).
/// The map image is looked up by location mention in the question first,
/// then in the generated answer.
pub async fn answer_question<C, E, K>(
    completion: &C,
    embedder: &E,
    index: &K,
    gazetteer: &Gazetteer,
    question: &str,
    history: &[ChatTurn],
    lang: Lang,
    top_k: usize,
) -> Result<RagAnswer, UpstreamError>
where
    C: CompletionModel,
    E: TextEmbedder,
    K: KnowledgeIndex,
{
    let vector = embedder.embed(question).await?;
    let chunks = index.search(&vector, top_k).await?;
    tracing::debug!(matches = chunks.len(), top_k, "knowledge index queried");

    let context = if chunks.is_empty() {
        CONTEXT_FALLBACK.to_string()
    } else {
        chunks
            .iter()
            .map(|chunk| chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR)
    };

    let request = CompletionRequest {
        system: Some(answer_system_instruction(&context, lang)),
        history: history.to_vec(),
        user: question.to_string(),
        max_output_tokens: None,
    };
    let outcome = completion.complete(&request).await?;
    let text = outcome.text.trim().to_string();

    let source = if text.ends_with('?') {
        None
    } else {
        chunks.first().map(|chunk| SourceContext {
            filename: chunk.filename.clone(),
            text_chunk: chunk.text.clone(),
        })
    };
    let image_url = gazetteer
        .find_map(question, lang)
        .or_else(|| gazetteer.find_map(&text, lang))
        .map(str::to_string);

    Ok(RagAnswer {
        text,
        source,
        image_url,
    })
}
