//! Tests for embedding providers and their registry entries

use catalog_application::ports::registry::{
    EmbeddingProviderConfig, list_embedding_providers, resolve_embedding_provider,
};
use catalog_providers::EmbeddingProvider;
use catalog_providers::embedding::NullEmbeddingProvider;

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (norm_a * norm_b)
}

#[tokio::test]
async fn test_null_provider_batch_preserves_order_and_dimension() {
    let provider = NullEmbeddingProvider::with_dimensions(128);
    let texts = vec![
        "Red mug".to_string(),
        "Blue ceramic mug".to_string(),
        "Steel kettle".to_string(),
    ];

    let vectors = provider.embed_batch(&texts).await.unwrap();

    assert_eq!(vectors.len(), 3);
    assert!(vectors.iter().all(|v| v.len() == 128));
    assert_eq!(vectors[1], provider.embed("Blue ceramic mug").await.unwrap());
}

#[tokio::test]
async fn test_null_provider_similarity_follows_shared_words() {
    let provider = NullEmbeddingProvider::new();
    let query = provider.embed("blue ceramic mug").await.unwrap();
    let same = provider.embed("Blue ceramic mug").await.unwrap();
    let close = provider.embed("Blue mug").await.unwrap();
    let far = provider.embed("Steel kettle").await.unwrap();

    assert!((cosine(&query, &same) - 1.0).abs() < 1e-6);
    assert!(cosine(&query, &close) > cosine(&query, &far));
}

#[test]
fn test_registry_lists_builtin_providers() {
    let names: Vec<&str> = list_embedding_providers()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert!(names.contains(&"null"), "registered: {names:?}");
    assert!(names.contains(&"ollama"), "registered: {names:?}");
    assert!(names.contains(&"openai"), "registered: {names:?}");
}

#[test]
fn test_resolve_null_provider_with_dimensions() {
    let provider =
        resolve_embedding_provider(&EmbeddingProviderConfig::new("null").with_dimensions(32))
            .unwrap();
    assert_eq!(provider.provider_name(), "null");
    assert_eq!(provider.dimensions(), 32);
}

#[test]
fn test_resolve_ollama_defaults_to_minilm() {
    let provider = resolve_embedding_provider(&EmbeddingProviderConfig::new("ollama")).unwrap();
    assert_eq!(provider.model(), "all-minilm");
    assert_eq!(provider.dimensions(), 384);
}

#[test]
fn test_resolve_openai_requires_api_key() {
    let err = resolve_embedding_provider(&EmbeddingProviderConfig::new("openai"))
        .err()
        .unwrap();
    assert!(err.contains("API key"), "{err}");

    let provider = resolve_embedding_provider(
        &EmbeddingProviderConfig::new("openai")
            .with_api_key(" sk-test ")
            .with_model("text-embedding-3-large"),
    )
    .unwrap();
    assert_eq!(provider.dimensions(), 3072);
}

#[test]
fn test_resolve_unknown_provider_lists_available() {
    let err = resolve_embedding_provider(&EmbeddingProviderConfig::new("does-not-exist"))
        .err()
        .unwrap();
    assert!(err.contains("Unknown embedding provider"));
    assert!(err.contains("null"));
}
