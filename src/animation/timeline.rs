// src/animation/timeline.rs
//
// The scripted phase sequence: eight contiguous phases on a single
// elapsed-time axis, looping forever. Phase payloads are literal
// choreography data (quadrant targets, stagger offsets, curve endpoints)
// copied from the tuned sequence, not derived from a formula.

use nannou::prelude::*;

use crate::animation::easing::{ease_in_out_quart, ease_out_bounce, interpolate};
use crate::views::Quad;

/// Which point a phase rotates the squares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    /// translate, then rotate, then scale: each square spins on its own center.
    Center,
    /// rotate, then translate, then scale: the squares orbit the window origin.
    Origin,
}

/// The per-phase payload, applied to all four squares each frame the
/// phase is active.
#[derive(Debug, Clone)]
pub enum PhaseAction {
    /// Snap to quadrant targets and bounce the scale down. Each entity gets
    /// its own duration offset so the bounces land slightly apart.
    BounceScale {
        targets: [Point2; 4],
        stagger: [f32; 4],
        from: f32,
        to: f32,
    },
    /// One shared rotation ramp; positions stay wherever the previous
    /// phase left them.
    OrbitTurn { from_deg: f32, to_deg: f32 },
    /// Snap to the next quadrant over, growing and turning about the
    /// squares' own centers.
    SwapGrow {
        targets: [Point2; 4],
        scale: (f32, f32),
        turn: (f32, f32),
    },
    /// Snap to the next quadrant over and swing around the origin.
    OrbitSwap {
        targets: [Point2; 4],
        turn: (f32, f32),
    },
}

#[derive(Debug, Clone)]
pub struct Phase {
    start: f32,
    end: f32,
    pivot: Pivot,
    action: PhaseAction,
}

impl Phase {
    /// Inclusive on both ends: at an exact boundary instant the outgoing and
    /// incoming phases are both active and both execute that frame.
    pub fn contains(&self, elapsed: f32) -> bool {
        elapsed >= self.start && elapsed <= self.end
    }

    pub fn span(&self) -> (f32, f32) {
        (self.start, self.end)
    }

    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    /// Write this phase's pose for the current instant into the four squares.
    /// `elapsed` is time since cycle start; the caller keeps it inside the
    /// phase interval.
    pub fn apply(&self, quads: &mut [Quad; 4], elapsed: f32) {
        let duration = self.end - self.start;
        let local = elapsed - self.start;

        match &self.action {
            PhaseAction::BounceScale {
                targets,
                stagger,
                from,
                to,
            } => {
                for (quad, target) in quads.iter_mut().zip(targets.iter()) {
                    quad.set_position(target.x, target.y);
                }
                for (quad, offset) in quads.iter_mut().zip(stagger.iter()) {
                    let scale = interpolate(duration + offset, local, *from, *to, ease_out_bounce);
                    quad.set_scale(scale);
                }
            }
            PhaseAction::OrbitTurn { from_deg, to_deg } => {
                let angle = interpolate(duration, local, *from_deg, *to_deg, ease_in_out_quart);
                for quad in quads.iter_mut() {
                    quad.set_angle(angle);
                }
            }
            PhaseAction::SwapGrow {
                targets,
                scale,
                turn,
            } => {
                let s = interpolate(duration, local, scale.0, scale.1, ease_in_out_quart);
                let angle = interpolate(duration, local, turn.0, turn.1, ease_in_out_quart);
                for (quad, target) in quads.iter_mut().zip(targets.iter()) {
                    quad.set_position(target.x, target.y);
                    quad.set_scale(s);
                    quad.set_angle(angle);
                }
            }
            PhaseAction::OrbitSwap { targets, turn } => {
                let angle = interpolate(duration, local, turn.0, turn.1, ease_in_out_quart);
                for (quad, target) in quads.iter_mut().zip(targets.iter()) {
                    quad.set_position(target.x, target.y);
                    quad.set_angle(angle);
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Timeline {
    phases: Vec<Phase>,
    total_duration: f32,
}

impl Timeline {
    /// The logomark sequence. `offset` is the distance from the window origin
    /// to each quadrant center (gap + half a square edge).
    pub fn logo_sequence(offset: f32) -> Self {
        let p = offset;

        let specs = vec![
            // 1. assemble: snap to quadrants, bounce down to half scale
            (
                0.8,
                Pivot::Center,
                PhaseAction::BounceScale {
                    targets: [pt2(-p, p), pt2(p, p), pt2(p, -p), pt2(-p, -p)],
                    stagger: [-0.075, 0.0, -0.05, -0.025],
                    from: 1.0,
                    to: 0.5,
                },
            ),
            // 2. quarter turn around the origin
            (
                0.75,
                Pivot::Origin,
                PhaseAction::OrbitTurn {
                    from_deg: 0.0,
                    to_deg: -90.0,
                },
            ),
            // 3. swap quadrants, grow back to full scale while turning
            (
                0.75,
                Pivot::Center,
                PhaseAction::SwapGrow {
                    targets: [pt2(p, p), pt2(p, -p), pt2(-p, -p), pt2(-p, p)],
                    scale: (0.5, 1.0),
                    turn: (-90.0, -180.0),
                },
            ),
            // 4. swap again, swinging back around the origin
            (
                0.75,
                Pivot::Origin,
                PhaseAction::OrbitSwap {
                    targets: [pt2(-p, -p), pt2(-p, p), pt2(p, p), pt2(p, -p)],
                    turn: (180.0, 90.0),
                },
            ),
            // 5. second bounce-down, stagger order reversed
            (
                0.8,
                Pivot::Center,
                PhaseAction::BounceScale {
                    targets: [pt2(p, -p), pt2(-p, -p), pt2(-p, p), pt2(p, p)],
                    stagger: [-0.025, -0.05, 0.0, -0.075],
                    from: 1.0,
                    to: 0.5,
                },
            ),
            // 6. quarter turn around the origin
            (
                0.75,
                Pivot::Origin,
                PhaseAction::OrbitTurn {
                    from_deg: 0.0,
                    to_deg: -90.0,
                },
            ),
            // 7. swap and grow
            (
                0.75,
                Pivot::Center,
                PhaseAction::SwapGrow {
                    targets: [pt2(-p, -p), pt2(-p, p), pt2(p, p), pt2(p, -p)],
                    scale: (0.5, 1.0),
                    turn: (-90.0, -180.0),
                },
            ),
            // 8. final swap back to the opening layout
            (
                0.75,
                Pivot::Origin,
                PhaseAction::OrbitSwap {
                    targets: [pt2(p, p), pt2(p, -p), pt2(-p, -p), pt2(-p, p)],
                    turn: (180.0, 90.0),
                },
            ),
        ];

        Self::from_specs(specs)
    }

    /// Lay the phases out end to end, accumulating durations from zero.
    fn from_specs(specs: Vec<(f32, Pivot, PhaseAction)>) -> Self {
        let mut phases = Vec::with_capacity(specs.len());
        let mut cursor = 0.0;

        for (duration, pivot, action) in specs {
            let start = cursor;
            cursor += duration;
            phases.push(Phase {
                start,
                end: cursor,
                pivot,
                action,
            });
        }

        Self {
            phases,
            total_duration: cursor,
        }
    }

    /// Every phase whose interval contains `elapsed`, in sequence order.
    /// Normally one; two at an exact phase boundary.
    pub fn active_phases(&self, elapsed: f32) -> impl Iterator<Item = &Phase> {
        self.phases.iter().filter(move |phase| phase.contains(elapsed))
    }

    pub fn is_cycle_complete(&self, elapsed: f32) -> bool {
        elapsed > self.total_duration
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> Timeline {
        Timeline::logo_sequence(0.11)
    }

    fn quads() -> [Quad; 4] {
        std::array::from_fn(|_| Quad::new(0.2, 0.2))
    }

    #[test]
    fn test_interval_table() {
        let expected = [
            (0.0, 0.8),
            (0.8, 1.55),
            (1.55, 2.3),
            (2.3, 3.05),
            (3.05, 3.85),
            (3.85, 4.6),
            (4.6, 5.35),
            (5.35, 6.1),
        ];

        let tl = timeline();
        assert_eq!(tl.phase_count(), 8);
        for (phase, (t1, t2)) in tl.phases().iter().zip(expected) {
            let (start, end) = phase.span();
            assert!((start - t1).abs() < 1e-4);
            assert!((end - t2).abs() < 1e-4);
        }
        assert!((tl.total_duration() - 6.1).abs() < 1e-4);
    }

    #[test]
    fn test_one_phase_active_mid_interval() {
        let tl = timeline();

        let active: Vec<_> = tl.active_phases(0.4).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].pivot(), Pivot::Center);

        let active: Vec<_> = tl.active_phases(1.0).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].pivot(), Pivot::Origin);
    }

    #[test]
    fn test_boundary_instant_activates_both_phases() {
        // inclusive bounds on both ends: the exact boundary runs two phases
        let tl = timeline();
        let active: Vec<_> = tl.active_phases(0.8).collect();
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn test_cycle_completion() {
        let tl = timeline();
        assert!(!tl.is_cycle_complete(6.05));
        assert!(tl.is_cycle_complete(6.15));
        assert_eq!(tl.active_phases(6.15).count(), 0);
    }

    #[test]
    fn test_loop_resets_to_first_phase() {
        use crate::animation::playback::PlaybackClock;

        let tl = timeline();
        let mut clock = PlaybackClock::new();
        clock.advance(100.0);

        // one frame past the final phase: nothing active, cycle complete
        let elapsed = clock.advance(106.15);
        assert!(tl.is_cycle_complete(elapsed));
        assert_eq!(tl.active_phases(elapsed).count(), 0);

        // next frame re-anchors and the opening phase is active again
        clock.restart_cycle();
        let elapsed = clock.advance(106.2);
        assert!(elapsed.abs() < 1e-6);
        let active: Vec<_> = tl.active_phases(elapsed).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].span().0, 0.0);
    }

    #[test]
    fn test_opening_phase_snaps_and_bounces() {
        let tl = timeline();
        let mut quads = quads();
        let phase = &tl.phases()[0];
        let (start, end) = phase.span();

        phase.apply(&mut quads, start);
        assert_eq!(quads[0].get_position(), pt2(-0.11, 0.11));
        assert_eq!(quads[1].get_position(), pt2(0.11, 0.11));
        assert_eq!(quads[2].get_position(), pt2(0.11, -0.11));
        assert_eq!(quads[3].get_position(), pt2(-0.11, -0.11));
        for quad in &quads {
            assert!((quad.get_scale() - 1.0).abs() < 1e-6);
        }

        // the unstaggered entity lands on the target at phase end
        phase.apply(&mut quads, end);
        assert!((quads[1].get_scale() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_stagger_offsets_desynchronize_the_bounce() {
        let tl = timeline();
        let mut quads = quads();
        let phase = &tl.phases()[0];

        phase.apply(&mut quads, 0.4);
        // entity 1 runs on a 0.725s ramp, entity 2 on the full 0.8s
        assert!((quads[0].get_scale() - 0.6248514).abs() < 1e-4);
        assert!((quads[1].get_scale() - 0.6171875).abs() < 1e-4);
    }

    #[test]
    fn test_orbit_phase_rotates_all_entities_together() {
        let tl = timeline();
        let mut quads = quads();

        // run the opening phase to its end so positions are snapped
        let opening = &tl.phases()[0];
        opening.apply(&mut quads, opening.span().1);

        let phase = &tl.phases()[1];
        let (start, end) = phase.span();
        assert_eq!(phase.pivot(), Pivot::Origin);

        phase.apply(&mut quads, start);
        for quad in &quads {
            assert!(quad.get_angle().abs() < 1e-4);
        }

        phase.apply(&mut quads, end);
        for quad in &quads {
            assert!((quad.get_angle() + 90.0).abs() < 1e-3);
        }
        // orbit-turn phases leave positions where the previous phase put them
        assert_eq!(quads[0].get_position(), pt2(-0.11, 0.11));
    }

    #[test]
    fn test_swap_phase_scales_and_turns_about_center() {
        let tl = timeline();
        let mut quads = quads();
        let phase = &tl.phases()[2];
        let (start, end) = phase.span();
        assert_eq!(phase.pivot(), Pivot::Center);

        phase.apply(&mut quads, start);
        assert_eq!(quads[0].get_position(), pt2(0.11, 0.11));
        assert!((quads[0].get_scale() - 0.5).abs() < 1e-4);
        assert!((quads[0].get_angle() + 90.0).abs() < 1e-3);

        phase.apply(&mut quads, end);
        assert!((quads[0].get_scale() - 1.0).abs() < 1e-4);
        assert!((quads[0].get_angle() + 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_final_phase_returns_to_opening_layout() {
        let tl = timeline();
        let mut quads = quads();
        let phase = &tl.phases()[7];
        let (_, end) = phase.span();

        phase.apply(&mut quads, end);
        assert!((quads[0].get_angle() - 90.0).abs() < 1e-3);
        // entity 1 back in the upper-right quadrant it swaps out of at reset
        assert_eq!(quads[0].get_position(), pt2(0.11, 0.11));
    }
}
