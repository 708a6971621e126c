//! Embedding pipeline tests

use std::sync::Arc;
use std::time::Duration;

use catalog_application::use_cases::{EmbeddingPipeline, EmbeddingPipelineConfig};
use catalog_providers::embedding::NullEmbeddingProvider;

use crate::test_utils::{ControlledEmbeddingProvider, DIMENSIONS, product};

fn pipeline_over(
    provider: Arc<ControlledEmbeddingProvider>,
    config: EmbeddingPipelineConfig,
) -> EmbeddingPipeline {
    EmbeddingPipeline::new(provider, config)
}

fn config() -> EmbeddingPipelineConfig {
    EmbeddingPipelineConfig {
        dimensions: Some(DIMENSIONS),
        timeout: Duration::from_secs(5),
        batch_size: 2,
    }
}

#[tokio::test]
async fn test_embeddings_are_unit_length() {
    let provider = Arc::new(ControlledEmbeddingProvider::new(DIMENSIONS));
    let pipeline = pipeline_over(provider, config());

    let vector = pipeline.embed("Blue ceramic mug").await.unwrap();

    assert_eq!(vector.dimensions(), DIMENSIONS);
    assert!((vector.norm() - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn test_product_text_is_name_then_description() {
    let provider = Arc::new(ControlledEmbeddingProvider::new(DIMENSIONS));
    let pipeline = pipeline_over(provider.clone(), config());

    let vector = pipeline
        .embed_product(&product(1, "Blue mug", "Ceramic", 5.0, 1))
        .await
        .unwrap();

    assert_eq!(vector, provider.vector_for("Blue mug Ceramic"));
}

#[tokio::test]
async fn test_batches_are_chunked_and_keep_order() {
    let provider = Arc::new(ControlledEmbeddingProvider::new(DIMENSIONS));
    let pipeline = pipeline_over(provider.clone(), config());
    let texts: Vec<String> = ["red mug", "blue mug", "steel kettle", "wool blanket", "desk lamp"]
        .iter()
        .map(ToString::to_string)
        .collect();

    let vectors = pipeline.embed_batch(&texts).await.unwrap();

    assert_eq!(provider.calls(), 3);
    assert_eq!(vectors.len(), texts.len());
    for (text, vector) in texts.iter().zip(&vectors) {
        assert_eq!(vector, &provider.vector_for(text));
    }
}

#[tokio::test]
async fn test_empty_text_is_rejected_before_calling_the_generator() {
    let provider = Arc::new(ControlledEmbeddingProvider::new(DIMENSIONS));
    let pipeline = pipeline_over(provider.clone(), config());

    let err = pipeline.embed("   ").await.unwrap_err();

    assert!(matches!(
        err,
        catalog_domain::error::Error::InvalidArgument { .. }
    ));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_wrong_dimension_is_unavailable() {
    let provider = Arc::new(NullEmbeddingProvider::with_dimensions(DIMENSIONS / 2));
    let pipeline = EmbeddingPipeline::new(provider, config());

    let err = pipeline.embed("Blue mug").await.unwrap_err();

    assert!(err.is_embedding_unavailable());
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_zero_vector_is_unavailable() {
    let provider = Arc::new(ControlledEmbeddingProvider::new(DIMENSIONS));
    let pipeline = pipeline_over(provider, config());

    // No word characters: the token hash yields the zero vector
    let err = pipeline.embed("?!").await.unwrap_err();

    assert!(err.is_embedding_unavailable());
}

#[tokio::test]
async fn test_generator_failure_is_unavailable() {
    let provider = Arc::new(ControlledEmbeddingProvider::new(DIMENSIONS));
    provider.set_failing(true);
    let pipeline = pipeline_over(provider, config());

    assert!(pipeline.embed("Blue mug").await.unwrap_err().is_embedding_unavailable());
}

#[tokio::test]
async fn test_slow_generator_times_out() {
    let provider = Arc::new(ControlledEmbeddingProvider::new(DIMENSIONS));
    provider.close();
    let pipeline = pipeline_over(
        provider.clone(),
        EmbeddingPipelineConfig {
            timeout: Duration::from_millis(20),
            ..config()
        },
    );

    let err = pipeline.embed("Blue mug").await.unwrap_err();

    assert!(err.is_embedding_unavailable());
    provider.open();
}

#[tokio::test]
async fn test_dimension_defaults_to_provider() {
    let provider = Arc::new(ControlledEmbeddingProvider::new(16));
    let pipeline = pipeline_over(
        provider,
        EmbeddingPipelineConfig {
            dimensions: None,
            ..config()
        },
    );

    assert_eq!(pipeline.dimensions(), 16);
    assert_eq!(pipeline.provider_name(), "controlled");
}
