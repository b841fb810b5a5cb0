// Copyright @yucwang 2026

use crate::core::session::VisualizeMode;
use crate::math::constants::{Float, Vector3f};
use crate::shapes::region::RegionKind;

const REGION_STEP: Float = 0.1;
const LIGHT_STEP: Float = 1.0;

/// Discrete state changes requested by the user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputCommand {
    SetMode(VisualizeMode),
    NextDataset,
    LightToCamera,
    ResetLight,
    MoveLight(Vector3f),
    SelectRegion(RegionKind),
    MoveRegion(Vector3f),
    ResizeRegion(Float),
    CycleSlabAxis,
}

/// Keyboard layout of the interactive viewer.
pub fn key_to_command(key: char) -> Option<InputCommand> {
    use InputCommand::*;

    let command = match key {
        '1' => SetMode(VisualizeMode::SolidPoints),
        '2' => SetMode(VisualizeMode::AdditivePoints),
        '3' => SetMode(VisualizeMode::ColorAlphaPoints),
        '4' => SetMode(VisualizeMode::PhongPoints),
        '5' => SetMode(VisualizeMode::SelectedPointsOnly),
        '6' => SetMode(VisualizeMode::EnhanceSelectedPoints),
        '7' => SetMode(VisualizeMode::Billboards),
        '8' => SetMode(VisualizeMode::BillboardsWithLod),
        '9' => SetMode(VisualizeMode::DrawAsArray),
        'n' => SetMode(VisualizeMode::None),
        'p' => NextDataset,
        'l' => LightToCamera,
        'k' => ResetLight,
        ',' => MoveLight(Vector3f::new(-LIGHT_STEP, 0.0, 0.0)),
        '.' => MoveLight(Vector3f::new(LIGHT_STEP, 0.0, 0.0)),
        ';' => MoveLight(Vector3f::new(0.0, -LIGHT_STEP, 0.0)),
        '\'' => MoveLight(Vector3f::new(0.0, LIGHT_STEP, 0.0)),
        '[' => MoveLight(Vector3f::new(0.0, 0.0, -LIGHT_STEP)),
        ']' => MoveLight(Vector3f::new(0.0, 0.0, LIGHT_STEP)),
        't' => SelectRegion(RegionKind::Sphere),
        'g' => SelectRegion(RegionKind::Cube),
        'b' => SelectRegion(RegionKind::Slab),
        'w' => MoveRegion(Vector3f::new(0.0, 0.0, -REGION_STEP)),
        's' => MoveRegion(Vector3f::new(0.0, 0.0, REGION_STEP)),
        'a' => MoveRegion(Vector3f::new(-REGION_STEP, 0.0, 0.0)),
        'd' => MoveRegion(Vector3f::new(REGION_STEP, 0.0, 0.0)),
        'q' => MoveRegion(Vector3f::new(0.0, -REGION_STEP, 0.0)),
        'e' => MoveRegion(Vector3f::new(0.0, REGION_STEP, 0.0)),
        'x' => ResizeRegion(REGION_STEP),
        'z' => ResizeRegion(-REGION_STEP),
        'o' => CycleSlabAxis,
        _ => return None,
    };
    Some(command)
}

/// Maps each character of `keys` to a command, dropping unbound keys.
pub fn parse_key_sequence(keys: &str) -> Vec<InputCommand> {
    keys.chars()
        .filter_map(|c| {
            let command = key_to_command(c);
            if command.is_none() && !c.is_whitespace() {
                log::warn!("Key '{}' is not bound to any command.", c);
            }
            command
        })
        .collect()
}
