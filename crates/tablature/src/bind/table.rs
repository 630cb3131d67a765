//! Table binding: the shape candidate trial loop

use std::any::Any;

use crate::error::{BindError, CandidateFailure, Result};
use crate::shape::{Shape, TargetType, TypeInfo};
use crate::value::Table;

use super::Binder;

/// Bind a table node to `target` by trying its shape candidates in order.
///
/// Failures of one candidate are caught and recorded, never escaping the
/// loop; the first success wins. Exhaustion surfaces as an aggregate
/// carrying every per-candidate failure in order.
pub(crate) fn bind_table(
    binder: &Binder<'_>,
    table: &Table,
    target: TargetType,
    depth: usize,
) -> Result<Box<dyn Any>> {
    let Some(info) = binder.shapes.type_info(target.id) else {
        return Err(BindError::ShapeNotFound {
            type_name: target.name.to_string(),
        });
    };
    if !info.has_construction_plan() {
        return Err(BindError::ShapeNotFound {
            type_name: target.name.to_string(),
        });
    }

    let mut causes: Vec<CandidateFailure> = Vec::new();

    for shape in info.candidates(Some(table.len())) {
        match try_candidate(binder, table, &info, shape, depth) {
            Ok(instance) => return Ok(instance),
            Err(error) => causes.push(CandidateFailure {
                shape: shape.signature(info.name),
                error,
            }),
        }
    }

    // Last resort for default-constructible targets: a zero value plus
    // the mandatory full fill
    if let Some(mut instance) = info.fallback_instance() {
        match fill(binder, table, &info, instance.as_mut(), depth) {
            Ok(()) => return Ok(instance),
            Err(error) => causes.push(CandidateFailure {
                shape: format!("{}::default()", info.name),
                error,
            }),
        }
    }

    Err(BindError::Aggregate {
        type_name: target.name.to_string(),
        causes,
    })
}

fn try_candidate(
    binder: &Binder<'_>,
    table: &Table,
    info: &TypeInfo,
    shape: &Shape,
    depth: usize,
) -> Result<Box<dyn Any>> {
    let mut values: Vec<Box<dyn Any>> = Vec::with_capacity(shape.member_count());
    for member in shape.members() {
        match table.get(&member.name) {
            Some(node) => values.push(binder.bind_node(node, member.ty, depth + 1)?),
            None => match member.default_value() {
                Some(default) => values.push(default),
                None => {
                    return Err(BindError::MissingRequiredField {
                        field: member.name.clone(),
                        shape: shape.signature(info.name),
                    })
                }
            },
        }
    }

    let mut instance = shape.invoke(values);

    // Values supplied through a constructor are final. Only the
    // no-argument path walks the settable members afterwards, so an
    // invariant computed inside a construct function is never overwritten.
    if shape.member_count() == 0 {
        fill(binder, table, info, instance.as_mut(), depth)?;
    }

    Ok(instance)
}

/// Assign every non-skip settable member from the table. Each member's
/// key is mandatory on this path.
fn fill(
    binder: &Binder<'_>,
    table: &Table,
    info: &TypeInfo,
    instance: &mut dyn Any,
    depth: usize,
) -> Result<()> {
    for member in info.settable_members() {
        let Some(node) = table.get(&member.name) else {
            return Err(BindError::MissingRequiredField {
                field: member.name.clone(),
                shape: format!("{} (member fill)", info.name),
            });
        };
        let value = binder.bind_node(node, member.ty, depth + 1)?;
        if !member.write(instance, value) {
            return Err(BindError::TypeConversion {
                from: node.kind_name().to_string(),
                to: member.ty.name.to_string(),
            });
        }
    }
    Ok(())
}
