//! Level catalog and loading
//!
//! Levels are immutable templates: static obstacle layout, pocket placement,
//! starting marbles and the shot budget. The built-in campaign is
//! hand-authored here; external packs load from JSON with the same schema.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ARENA_CENTER, BOUNDARY_RADIUS};
use crate::sim::state::{Obstacle, Pocket};

/// A malformed level definition. Surfaced when the level is instantiated,
/// never silently repaired.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level index {index} out of range (catalog has {count})")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("level {index} ({name:?}) has no target marbles")]
    NoMarbles { index: usize, name: String },
    #[error("level {index} ({name:?}) has no pockets")]
    NoPockets { index: usize, name: String },
    #[error("level {index} ({name:?}) has a zero shot budget")]
    NoShots { index: usize, name: String },
    #[error("level {index} ({name:?}): marble {marble} starts outside the arena")]
    MarbleOutOfBounds {
        index: usize,
        name: String,
        marble: usize,
    },
    #[error("level {index} ({name:?}): marble {marble} has non-positive radius or mass")]
    BadMarble {
        index: usize,
        name: String,
        marble: usize,
    },
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Starting state for one target marble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarbleDef {
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub mass: f32,
}

/// An immutable level template. Instantiating a [`World`](crate::sim::World)
/// from it deep-copies everything, so retries always restore exact initial
/// conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    pub description: String,
    pub shots: u32,
    pub obstacles: Vec<Obstacle>,
    pub pockets: Vec<Pocket>,
    pub marbles: Vec<MarbleDef>,
}

impl LevelDef {
    /// Validate structural soundness. `index` is only used for error context.
    pub fn validate(&self, index: usize) -> Result<(), LevelError> {
        let name = self.name.clone();
        if self.marbles.is_empty() {
            return Err(LevelError::NoMarbles { index, name });
        }
        if self.pockets.is_empty() {
            return Err(LevelError::NoPockets { index, name });
        }
        if self.shots == 0 {
            return Err(LevelError::NoShots { index, name });
        }
        for (marble, m) in self.marbles.iter().enumerate() {
            if m.radius <= 0.0 || m.mass <= 0.0 {
                return Err(LevelError::BadMarble {
                    index,
                    name,
                    marble,
                });
            }
            if m.pos.distance(ARENA_CENTER) + m.radius > BOUNDARY_RADIUS {
                return Err(LevelError::MarbleOutOfBounds {
                    index,
                    name,
                    marble,
                });
            }
        }
        Ok(())
    }
}

/// Parse a level pack from JSON. Each entry is validated before the pack is
/// accepted.
pub fn from_json(data: &str) -> Result<Vec<LevelDef>, LevelError> {
    let levels: Vec<LevelDef> = serde_json::from_str(data)?;
    for (index, level) in levels.iter().enumerate() {
        level.validate(index)?;
    }
    Ok(levels)
}

fn wall(x: f32, y: f32, w: f32, h: f32, color: u32) -> Obstacle {
    Obstacle {
        pos: Vec2::new(x, y),
        width: w,
        height: h,
        color,
    }
}

fn pocket(x: f32, y: f32, r: f32) -> Pocket {
    Pocket {
        pos: Vec2::new(x, y),
        radius: r,
    }
}

fn marble(x: f32, y: f32, r: f32, color: u32, mass: f32) -> MarbleDef {
    MarbleDef {
        pos: Vec2::new(x, y),
        radius: r,
        color,
        mass,
    }
}

/// The built-in seven-level campaign.
pub fn builtin_levels() -> Vec<LevelDef> {
    vec![
        LevelDef {
            name: "Level 1: The Corner Pocket".into(),
            description: "Knock the red marble into the corner pocket.".into(),
            shots: 3,
            obstacles: vec![wall(200.0, 300.0, 400.0, 20.0, 0x6366f1)],
            pockets: vec![pocket(400.0, 100.0, 30.0)],
            marbles: vec![marble(400.0, 200.0, 20.0, 0xff0055, 1.0)],
        },
        LevelDef {
            name: "Level 2: The Split".into(),
            description: "Two targets, two pockets. Watch the bounce.".into(),
            shots: 3,
            obstacles: vec![wall(380.0, 280.0, 40.0, 40.0, 0x8b5cf6)],
            pockets: vec![pocket(200.0, 200.0, 30.0), pocket(600.0, 200.0, 30.0)],
            marbles: vec![
                marble(350.0, 350.0, 18.0, 0xff0055, 1.0),
                marble(450.0, 350.0, 18.0, 0xff0055, 1.0),
            ],
        },
        LevelDef {
            name: "Level 3: The Bunker".into(),
            description: "Bank off the walls to reach the target inside.".into(),
            shots: 4,
            obstacles: vec![
                wall(300.0, 200.0, 20.0, 120.0, 0xec4899),
                wall(480.0, 200.0, 20.0, 120.0, 0xec4899),
                wall(300.0, 320.0, 200.0, 20.0, 0xec4899),
            ],
            pockets: vec![pocket(400.0, 250.0, 25.0)],
            marbles: vec![
                marble(400.0, 280.0, 15.0, 0x00ffaa, 1.0),
                marble(200.0, 150.0, 15.0, 0xffcc00, 1.0),
            ],
        },
        LevelDef {
            name: "Level 4: The Slalom".into(),
            description: "Weave through the barriers to hit the top targets.".into(),
            shots: 4,
            obstacles: vec![
                wall(150.0, 350.0, 200.0, 20.0, 0x06b6d4),
                wall(450.0, 250.0, 200.0, 20.0, 0x06b6d4),
                wall(150.0, 150.0, 200.0, 20.0, 0x06b6d4),
            ],
            pockets: vec![pocket(400.0, 80.0, 30.0), pocket(600.0, 150.0, 25.0)],
            marbles: vec![
                marble(500.0, 100.0, 18.0, 0xff0055, 1.0),
                marble(250.0, 250.0, 18.0, 0xff0055, 1.0),
            ],
        },
        LevelDef {
            name: "Level 5: Needle Thread".into(),
            description: "Precision is key. Shoot through the narrow gap.".into(),
            shots: 3,
            obstacles: vec![
                wall(200.0, 300.0, 180.0, 40.0, 0xf59e0b),
                wall(420.0, 300.0, 180.0, 40.0, 0xf59e0b),
            ],
            pockets: vec![pocket(400.0, 150.0, 25.0)],
            marbles: vec![
                marble(400.0, 200.0, 15.0, 0xff0055, 1.0),
                marble(370.0, 280.0, 12.0, 0xffcc00, 0.5),
                marble(430.0, 280.0, 12.0, 0xffcc00, 0.5),
            ],
        },
        LevelDef {
            name: "Level 6: The Fortress".into(),
            description: "Breach the walls. The target is heavily guarded.".into(),
            shots: 5,
            obstacles: vec![
                wall(300.0, 150.0, 200.0, 10.0, 0xef4444),
                wall(300.0, 350.0, 200.0, 10.0, 0xef4444),
                wall(300.0, 150.0, 10.0, 210.0, 0xef4444),
                wall(490.0, 150.0, 10.0, 210.0, 0xef4444),
                wall(380.0, 280.0, 40.0, 10.0, 0x991b1b),
            ],
            pockets: vec![
                pocket(400.0, 200.0, 20.0),
                pocket(200.0, 200.0, 30.0),
                pocket(600.0, 200.0, 30.0),
            ],
            marbles: vec![
                marble(400.0, 250.0, 15.0, 0xff0055, 1.0),
                marble(200.0, 250.0, 18.0, 0xff0055, 1.0),
                marble(600.0, 250.0, 18.0, 0xff0055, 1.0),
            ],
        },
        LevelDef {
            name: "Level 7: Chaos Theory".into(),
            description: "A field of debris. Luck favors the bold.".into(),
            shots: 6,
            obstacles: vec![
                wall(300.0, 400.0, 30.0, 30.0, 0x8b5cf6),
                wall(470.0, 400.0, 30.0, 30.0, 0x8b5cf6),
                wall(385.0, 300.0, 30.0, 30.0, 0x8b5cf6),
                wall(250.0, 200.0, 30.0, 30.0, 0x8b5cf6),
                wall(520.0, 200.0, 30.0, 30.0, 0x8b5cf6),
            ],
            pockets: vec![
                pocket(400.0, 100.0, 40.0),
                pocket(150.0, 300.0, 30.0),
                pocket(650.0, 300.0, 30.0),
            ],
            marbles: vec![
                marble(350.0, 150.0, 15.0, 0xff0055, 1.0),
                marble(450.0, 150.0, 15.0, 0xff0055, 1.0),
                marble(200.0, 350.0, 15.0, 0xff0055, 1.0),
                marble(600.0, 350.0, 15.0, 0xff0055, 1.0),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_campaign_is_valid() {
        let catalog = builtin_levels();
        assert_eq!(catalog.len(), 7);
        for (i, level) in catalog.iter().enumerate() {
            level.validate(i).expect("built-in level must validate");
        }
    }

    #[test]
    fn shot_budgets_match_the_campaign_curve() {
        let budgets: Vec<u32> = builtin_levels().iter().map(|l| l.shots).collect();
        assert_eq!(budgets, vec![3, 3, 4, 4, 3, 5, 6]);
    }

    #[test]
    fn validation_rejects_a_level_without_marbles() {
        let mut level = builtin_levels().remove(0);
        level.marbles.clear();
        assert!(matches!(
            level.validate(0),
            Err(LevelError::NoMarbles { index: 0, .. })
        ));
    }

    #[test]
    fn validation_rejects_a_marble_outside_the_arena() {
        let mut level = builtin_levels().remove(0);
        level.marbles[0].pos = Vec2::new(790.0, 10.0);
        assert!(matches!(
            level.validate(3),
            Err(LevelError::MarbleOutOfBounds {
                index: 3,
                marble: 0,
                ..
            })
        ));
    }

    #[test]
    fn validation_rejects_a_zero_shot_budget() {
        let mut level = builtin_levels().remove(0);
        level.shots = 0;
        assert!(matches!(level.validate(0), Err(LevelError::NoShots { .. })));
    }

    #[test]
    fn json_pack_round_trips_through_the_loader() {
        let catalog = builtin_levels();
        let json = serde_json::to_string(&catalog).expect("serialize");
        let loaded = from_json(&json).expect("load");
        assert_eq!(loaded.len(), catalog.len());
        assert_eq!(loaded[2].name, "Level 3: The Bunker");
        assert_eq!(loaded[2].marbles.len(), 2);
    }

    #[test]
    fn json_pack_with_a_bad_level_is_rejected() {
        let json = r#"[{
            "name": "Broken",
            "description": "",
            "shots": 2,
            "obstacles": [],
            "pockets": [],
            "marbles": [{"pos": [400.0, 200.0], "radius": 10.0, "color": 255, "mass": 1.0}]
        }]"#;
        assert!(matches!(from_json(json), Err(LevelError::NoPockets { .. })));
    }
}
