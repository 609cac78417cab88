/// Normalization hook applied to every text before embedding.
///
/// Currently a pass-through. It exists so seed texts and query texts are
/// guaranteed to go through the same preprocessing once tokenization or
/// cleanup is added here.
#[must_use]
pub fn preprocess(text: &str) -> String {
    text.to_string()
}
