//! B-rep entities produced by truck-stepio.
//!
//! truck writes a body as a complete single-product STEP file. Only the
//! shell graph is kept: it is renumbered into the assembly's entity list
//! and wrapped in a `MANIFOLD_SOLID_BREP` named after the part. Products,
//! contexts and units come from the assembly writer instead.

use std::collections::{BTreeMap, BTreeSet};

use truck_stepio::out::{CompleteStepDisplay, StepHeaderDescriptor, StepModel};

use super::error::{StepError, StepResult};
use super::writer::{string, EntityWriter, Ref};
use super::StepHeader;
use crate::geometry::Body;

/// Writes `body` through truck-stepio.
fn body_to_step(body: &Body) -> String {
    let compressed = body.brep().compress();
    CompleteStepDisplay::new(
        StepModel::from(&compressed),
        StepHeaderDescriptor {
            organization_system: StepHeader::originating_system(),
            ..Default::default()
        },
    )
    .to_string()
}

/// Entity instances of the first `DATA` section, keyed by id.
///
/// Whitespace outside string literals is collapsed so every instance fits
/// on one line.
fn parse_entities(step: &str) -> StepResult<BTreeMap<usize, String>> {
    let data = step
        .split_once("DATA;")
        .map_or("", |(_, rest)| rest.split("ENDSEC;").next().unwrap_or(""));

    let mut entities = BTreeMap::new();
    let mut record = String::new();
    let mut in_string = false;
    for c in data.chars() {
        match c {
            '\'' => {
                in_string = !in_string;
                record.push(c);
            }
            ';' if !in_string => {
                let (id, value) = split_record(record.trim())?;
                entities.insert(id, value);
                record.clear();
            }
            c if c.is_whitespace() && !in_string => {
                if !record.is_empty() && !record.ends_with(' ') {
                    record.push(' ');
                }
            }
            c => record.push(c),
        }
    }
    Ok(entities)
}

/// Splits `#12 = VALUE` into `(12, "VALUE")`.
fn split_record(record: &str) -> StepResult<(usize, String)> {
    record
        .split_once('=')
        .and_then(|(id, value)| {
            let id = id.trim().strip_prefix('#')?.parse().ok()?;
            Some((id, value.trim().to_string()))
        })
        .ok_or_else(|| StepError::malformed(record))
}

/// Calls `f` for each `#n` outside string literals, with its byte range.
fn for_each_reference(value: &str, mut f: impl FnMut(std::ops::Range<usize>, usize)) {
    let bytes = value.as_bytes();
    let mut in_string = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => in_string = !in_string,
            b'#' if !in_string => {
                let end = bytes[i + 1..]
                    .iter()
                    .position(|b| !b.is_ascii_digit())
                    .map_or(bytes.len(), |n| i + 1 + n);
                if let Ok(id) = value[i + 1..end].parse() {
                    f(i..end, id);
                }
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
}

fn references(value: &str) -> Vec<usize> {
    let mut ids = Vec::new();
    for_each_reference(value, |_, id| ids.push(id));
    ids
}

/// Replaces every reference through `map`.
fn renumber(value: &str, map: &BTreeMap<usize, Ref>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last = 0;
    for_each_reference(value, |range, id| {
        out.push_str(&value[last..range.start]);
        match map.get(&id) {
            Some(new) => out.push_str(&new.to_string()),
            None => out.push_str(&value[range.clone()]),
        }
        last = range.end;
    });
    out.push_str(&value[last..]);
    out
}

/// Shells to export: those of the solid B-reps, or every closed shell.
fn shell_roots(entities: &BTreeMap<usize, String>) -> Vec<usize> {
    let shells: Vec<usize> = entities
        .values()
        .filter(|value| value.starts_with("MANIFOLD_SOLID_BREP"))
        .filter_map(|value| references(value).last().copied())
        .collect();
    if !shells.is_empty() {
        return shells;
    }
    entities
        .iter()
        .filter(|(_, value)| value.starts_with("CLOSED_SHELL"))
        .map(|(&id, _)| id)
        .collect()
}

/// Copies the shell graph of one body into `w` and returns its B-reps.
pub(super) fn import_body(
    w: &mut EntityWriter,
    body: &Body,
    name: &str,
) -> StepResult<Vec<Ref>> {
    import_entities(w, &parse_entities(&body_to_step(body))?, name)
}

fn import_entities(
    w: &mut EntityWriter,
    entities: &BTreeMap<usize, String>,
    name: &str,
) -> StepResult<Vec<Ref>> {
    let shells = shell_roots(entities);
    if shells.is_empty() {
        return Err(StepError::NoShell {
            part: name.to_string(),
        });
    }

    let mut reachable = BTreeSet::new();
    let mut pending = shells.clone();
    while let Some(id) = pending.pop() {
        if reachable.insert(id) {
            let value = entities
                .get(&id)
                .ok_or(StepError::UndefinedReference { id })?;
            pending.extend(references(value));
        }
    }

    // Instances keep their relative order, so ids are known before writing.
    let first = w.next_ref().0;
    let map: BTreeMap<usize, Ref> = reachable
        .iter()
        .enumerate()
        .map(|(offset, &id)| (id, Ref(first + offset)))
        .collect();
    for (id, value) in entities.iter().filter(|(id, _)| reachable.contains(id)) {
        let written = w.add(renumber(value, &map));
        debug_assert_eq!(Some(&written), map.get(id));
    }

    let name = string(name);
    Ok(shells
        .iter()
        .filter_map(|id| map.get(id))
        .map(|shell| w.add(format_args!("MANIFOLD_SOLID_BREP({name},{shell})")))
        .collect())
}
