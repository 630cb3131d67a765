//! Collection builder: array nodes to sequence-shaped targets

use std::any::Any;

use crate::error::{BindError, Result};
use crate::shape::TargetType;
use crate::value::ArrayNode;

use super::Binder;

/// Build `target` from an array node.
///
/// Three strategies, tried in order, each attempted for every viable
/// element type before falling through:
///
/// 1. the target itself is a registered sequence;
/// 2. the target has a shape whose sole member is a registered sequence;
/// 3. a registered sequence converter has the target as its destination.
///
/// Failures inside a tier are speculative and swallowed; only exhaustion
/// of all three surfaces, naming the target type.
pub(crate) fn build(
    binder: &Binder<'_>,
    array: &ArrayNode,
    target: TargetType,
    depth: usize,
) -> Result<Box<dyn Any>> {
    // Tier 1: direct sequence target
    if let Some(seq) = binder.shapes.sequence_info(target.id) {
        if let Ok(items) = bind_elements(binder, array, seq.elem, depth) {
            if let Some(out) = seq.assemble(items) {
                return Ok(out);
            }
        }
    }

    // Tier 2: shape with a single sequence member
    if let Some(info) = binder.shapes.type_info(target.id) {
        for shape in info.candidates(None) {
            let mut members = shape.members();
            let (Some(member), None) = (members.next(), members.next()) else {
                continue;
            };
            let Some(seq) = binder.shapes.sequence_info(member.ty.id) else {
                continue;
            };
            let Ok(items) = bind_elements(binder, array, seq.elem, depth) else {
                continue;
            };
            let Some(sequence) = seq.assemble(items) else {
                continue;
            };
            return Ok(shape.invoke(vec![sequence]));
        }
    }

    // Tier 3: registered sequence converters into the target
    for conversion in binder.conversions.sequence_conversions(target.id) {
        let Ok(items) = bind_elements(binder, array, conversion.elem, depth) else {
            continue;
        };
        if let Some(out) = conversion.apply(items) {
            return Ok(out);
        }
    }

    Err(BindError::ArrayBuild {
        type_name: target.name.to_string(),
    })
}

fn bind_elements(
    binder: &Binder<'_>,
    array: &ArrayNode,
    elem: TargetType,
    depth: usize,
) -> Result<Vec<Box<dyn Any>>> {
    array
        .iter()
        .map(|item| binder.bind_node(item, elem, depth + 1))
        .collect()
}
