//! Parallel rendering of many message bodies.

use crate::context::RenderContext;
use crate::renderer::{BodyRenderer, MessageRenderer};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// One message to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInput {
    /// Caller-chosen identifier (message id, stanza id, ...).
    pub id: String,
    /// Message body.
    pub text: String,
}

/// The markup for one [`BatchInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    /// Identifier copied from the input.
    pub id: String,
    /// Rendered markup.
    pub markup: String,
}

/// Batch settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Size of a dedicated thread pool. `None` uses the global pool.
    pub max_threads: Option<usize>,
}

/// Counters for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchStats {
    /// Messages rendered.
    pub total: usize,
    /// Messages that contained at least one marker character.
    pub styled: usize,
    /// Wall-clock time in milliseconds.
    pub processing_time_ms: f64,
}

/// Renders `inputs` in parallel. Outputs come back in input order.
pub fn render_batch<R>(
    renderer: &MessageRenderer<R>,
    inputs: Vec<BatchInput>,
    options: BatchOptions,
) -> (Vec<BatchOutput>, BatchStats)
where
    R: BodyRenderer + Sync,
{
    let start = Instant::now();

    let pool = options.max_threads.and_then(|threads| {
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => Some(pool),
            Err(err) => {
                log::warn!("could not build a {threads}-thread pool ({err}); using the global pool");
                None
            }
        }
    });

    let total = inputs.len();
    let styled = AtomicUsize::new(0);

    let process_input = |input: BatchInput| -> BatchOutput {
        if msgstyle_core::contains_directives(&input.text) {
            styled.fetch_add(1, Ordering::Relaxed);
        }
        let markup = renderer
            .render(&input.text, RenderContext::root(&()))
            .into_string();
        BatchOutput {
            id: input.id,
            markup,
        }
    };

    let outputs: Vec<BatchOutput> = if let Some(pool) = pool {
        pool.install(|| inputs.into_par_iter().map(process_input).collect())
    } else {
        inputs.into_par_iter().map(process_input).collect()
    };

    let elapsed = start.elapsed();
    log::debug!("rendered {total} messages in {elapsed:?}");

    (
        outputs,
        BatchStats {
            total,
            styled: styled.load(Ordering::Relaxed),
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn inputs() -> Vec<BatchInput> {
        (0..32)
            .map(|n| BatchInput {
                id: format!("m{n}"),
                text: if n % 2 == 0 {
                    format!("*bold {n}*")
                } else {
                    format!("plain {n}")
                },
            })
            .collect()
    }

    #[test]
    fn preserves_input_order() {
        let (outputs, stats) =
            render_batch(&MessageRenderer::default(), inputs(), BatchOptions::default());
        assert_eq!(stats.total, 32);
        assert_eq!(stats.styled, 16);
        for (n, output) in outputs.iter().enumerate() {
            assert_eq!(output.id, format!("m{n}"));
        }
        assert!(outputs[0].markup.contains("<b>bold 0</b>"));
        assert_eq!(outputs[1].markup, "plain 1");
    }

    #[test]
    fn dedicated_pool_matches_global_pool() {
        let renderer = MessageRenderer::new(Options::default());
        let (global, _) = render_batch(&renderer, inputs(), BatchOptions::default());
        let (pooled, _) = render_batch(
            &renderer,
            inputs(),
            BatchOptions {
                max_threads: Some(2),
            },
        );
        assert_eq!(global, pooled);
    }

    #[test]
    fn empty_batch() {
        let (outputs, stats) =
            render_batch(&MessageRenderer::default(), Vec::new(), BatchOptions::default());
        assert!(outputs.is_empty());
        assert_eq!(stats.total, 0);
    }
}
