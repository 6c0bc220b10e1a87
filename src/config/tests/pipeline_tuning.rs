//! Tests for worker, queue and page size validation.

use rstest::rstest;

use crate::DevstatsConfig;
use crate::github::StatsError;
use crate::pipeline::PipelineConfig;

#[rstest]
fn default_tuning_is_valid() {
    let config = DevstatsConfig::default()
        .pipeline_config()
        .expect("defaults should validate");

    assert_eq!(config, PipelineConfig::default());
}

#[rstest]
#[case::zero_workers(0, 1024, 100, "workers")]
#[case::zero_queue(4, 0, 100, "queue_capacity")]
#[case::zero_page(4, 1024, 0, "per_page")]
#[case::oversized_page(4, 1024, 101, "per_page")]
fn rejects_out_of_range_tuning(
    #[case] workers: usize,
    #[case] queue_capacity: usize,
    #[case] per_page: u8,
    #[case] field: &str,
) {
    let config = DevstatsConfig {
        workers,
        queue_capacity,
        per_page,
        ..DevstatsConfig::default()
    };

    let result = config.pipeline_config();

    let Err(StatsError::Configuration { message }) = result else {
        panic!("expected Configuration error for {field}");
    };
    assert!(
        message.contains(field),
        "message should name {field}, got: {message}"
    );
}

#[rstest]
fn accepts_custom_tuning() {
    let config = DevstatsConfig {
        workers: 16,
        queue_capacity: 8,
        per_page: 50,
        ..DevstatsConfig::default()
    };

    assert_eq!(
        config.pipeline_config().expect("tuning should validate"),
        PipelineConfig {
            workers: 16,
            queue_capacity: 8,
            per_page: 50,
        }
    );
}
