//! Sub-pass sequencing for the multi-pass separable blur.
//!
//! Blur reach comes from repeating a modest 1D kernel, not from widening it:
//! each pass pair smears horizontally into one scratch target and vertically
//! into the other, and the next pair picks up where the last one wrote.

/// Which axis a blur sub-pass smears along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlurDirection {
    Horizontal,
    Vertical,
}

impl BlurDirection {
    /// Direction vector handed to the blur uniform block.
    pub(crate) fn as_vector(self) -> [f32; 2] {
        match self {
            BlurDirection::Horizontal => [1.0, 0.0],
            BlurDirection::Vertical => [0.0, 1.0],
        }
    }

    /// Index into the pre-built per-direction uniform bind groups.
    pub(crate) fn index(self) -> usize {
        match self {
            BlurDirection::Horizontal => 0,
            BlurDirection::Vertical => 1,
        }
    }
}

/// Where a blur sub-pass reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlurSource {
    Scene,
    Ping,
    Pong,
}

/// Where a blur sub-pass writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlurTarget {
    Ping,
    Pong,
    Surface,
}

/// One directional sub-pass in the per-frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlurStep {
    pub direction: BlurDirection,
    pub source: BlurSource,
    pub target: BlurTarget,
}

/// Expands the configured pass count into the exact sub-pass sequence run
/// each frame. The first horizontal pass reads the rasterized dot field,
/// every later horizontal pass reads the previous pair's vertical output, and
/// only the final vertical pass targets the visible surface.
pub(crate) fn blur_schedule(passes: usize) -> Vec<BlurStep> {
    let mut steps = Vec::with_capacity(passes * 2);
    for pass in 0..passes {
        steps.push(BlurStep {
            direction: BlurDirection::Horizontal,
            source: if pass == 0 {
                BlurSource::Scene
            } else {
                BlurSource::Pong
            },
            target: BlurTarget::Ping,
        });
        steps.push(BlurStep {
            direction: BlurDirection::Vertical,
            source: BlurSource::Ping,
            target: if pass + 1 == passes {
                BlurTarget::Surface
            } else {
                BlurTarget::Pong
            },
        });
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BLUR_PASSES;

    #[test]
    fn schedule_runs_two_sub_passes_per_pair() {
        for passes in [1, 2, BLUR_PASSES, 9] {
            assert_eq!(blur_schedule(passes).len(), passes * 2);
        }
        assert!(blur_schedule(0).is_empty());
    }

    #[test]
    fn directions_alternate_horizontal_then_vertical() {
        for (index, step) in blur_schedule(BLUR_PASSES).iter().enumerate() {
            let expected = if index % 2 == 0 {
                BlurDirection::Horizontal
            } else {
                BlurDirection::Vertical
            };
            assert_eq!(step.direction, expected);
        }
    }

    #[test]
    fn only_the_final_sub_pass_targets_the_surface() {
        let steps = blur_schedule(BLUR_PASSES);
        let surface_hits: Vec<usize> = steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.target == BlurTarget::Surface)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(surface_hits, vec![steps.len() - 1]);
    }

    #[test]
    fn ping_pong_chains_each_pair_into_the_next() {
        let steps = blur_schedule(3);
        assert_eq!(steps[0].source, BlurSource::Scene);
        assert_eq!(steps[0].target, BlurTarget::Ping);
        assert_eq!(steps[1].source, BlurSource::Ping);
        assert_eq!(steps[1].target, BlurTarget::Pong);
        assert_eq!(steps[2].source, BlurSource::Pong);
        assert_eq!(steps[3].target, BlurTarget::Pong);
        assert_eq!(steps[4].source, BlurSource::Pong);
        assert_eq!(steps[5].target, BlurTarget::Surface);
    }

    #[test]
    fn single_pass_goes_straight_from_scene_to_surface() {
        let steps = blur_schedule(1);
        assert_eq!(steps[0].source, BlurSource::Scene);
        assert_eq!(steps[1].target, BlurTarget::Surface);
    }
}
