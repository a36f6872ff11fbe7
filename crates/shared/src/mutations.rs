//! Mutator - shape-preserving edits to the host's variable container.
//!
//! Each operation is a pure function of the current raw container and its
//! arguments. It returns the container to write back together with the new
//! typed value, so the caller can apply the same edit to local state.
//!
//! Writes never introduce a second alias for a logical field: the edited
//! sub-tree lands under the first alias already present and the other
//! aliases are removed.

use serde_json::{Map, Value};
use thiserror::Error;
use tianfa_domain::{ActiveModes, GameMode, Villain};

use crate::aliases::{self, Aliases};
use crate::envelope::HostEnvelope;
use crate::normalize::{sub_object, ListShape};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("{field} index {index} out of range (len {len})")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Villain not found: {0}")]
    VillainNotFound(String),
}

/// Result of a mutation: the container to persist and the new typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub container: Value,
    pub value: T,
}

/// Remove the title at `index`.
///
/// `titles` is the typed list the index refers to and `shape` the container
/// shape observed when it was read. See [`delete_item`] for how the shape is
/// applied.
pub fn delete_title(
    container: Value,
    titles: &[String],
    shape: ListShape,
    index: usize,
) -> Result<Mutation<Vec<String>>, MutationError> {
    delete_list_entry(container, aliases::TITLES, "称号", titles, shape, index)
}

/// Remove the inventory item at `index`.
///
/// The shape captured at read time decides what is written. A `Mapping` is
/// rebuilt from the current raw mapping without the entry at `index`; if the
/// host no longer holds a mapping there, the typed list is written as a
/// sequence instead. Every other shape writes the typed list as a sequence,
/// even when the host has since switched to a mapping.
pub fn delete_item(
    container: Value,
    inventory: &[String],
    shape: ListShape,
    index: usize,
) -> Result<Mutation<Vec<String>>, MutationError> {
    delete_list_entry(container, aliases::INVENTORY, "物品栏", inventory, shape, index)
}

fn delete_list_entry(
    container: Value,
    field: Aliases,
    field_name: &'static str,
    typed: &[String],
    shape: ListShape,
    index: usize,
) -> Result<Mutation<Vec<String>>, MutationError> {
    if index >= typed.len() {
        return Err(MutationError::IndexOutOfRange {
            field: field_name,
            index,
            len: typed.len(),
        });
    }

    let mut next_typed = typed.to_vec();
    next_typed.remove(index);

    let mut envelope = HostEnvelope::from_value(container);
    let root = envelope.root_mut();
    let mut protagonist = sub_object(aliases::PROTAGONIST.resolve(root));

    let raw_field = field.resolve(&protagonist);
    let current_shape = ListShape::of(raw_field);
    if current_shape != shape {
        tracing::warn!(
            field = field_name,
            read_shape = ?shape,
            current_shape = ?current_shape,
            "List shape changed since read; writing the shape that was read"
        );
    }

    let as_sequence = || Value::Array(next_typed.iter().cloned().map(Value::String).collect());
    let next_raw = match (shape, raw_field) {
        (ListShape::Mapping, Some(Value::Object(entries))) => {
            Value::Object(remove_mapping_entry(entries, index))
        }
        _ => as_sequence(),
    };

    protagonist.insert(field.write_key(&protagonist).to_string(), next_raw);
    let written_to = aliases::PROTAGONIST.write_exclusive(root, Value::Object(protagonist));

    tracing::debug!(
        field = field_name,
        index,
        protagonist_key = written_to,
        "List entry removed from host container"
    );

    Ok(Mutation {
        container: envelope.into_value(),
        value: next_typed,
    })
}

/// Drop the entry at `index` and rebuild the mapping from the rest, keeping
/// the remaining keys in their original order.
fn remove_mapping_entry(entries: &Map<String, Value>, index: usize) -> Map<String, Value> {
    entries
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != index)
        .map(|(_, (key, value))| (key.clone(), value.clone()))
        .collect()
}

/// Remove the villain with `id` from the roster.
///
/// The remaining roster is written as a keyed mapping under `反派列表` and
/// `反派`, and as a sequence under `villains`.
pub fn delete_villain(
    container: Value,
    roster: &[Villain],
    id: &str,
) -> Result<Mutation<Vec<Villain>>, MutationError> {
    if !roster.iter().any(|v| v.id == id) {
        return Err(MutationError::VillainNotFound(id.to_string()));
    }

    let next: Vec<Villain> = roster.iter().filter(|v| v.id != id).cloned().collect();

    let as_sequence: Vec<Value> = next.iter().map(villain_value).collect();
    let as_mapping: Map<String, Value> = next
        .iter()
        .map(|v| (v.id.clone(), villain_value(v)))
        .collect();

    let mut envelope = HostEnvelope::from_value(container);
    let root = envelope.root_mut();
    let [keyed, legacy_keyed, sequence] = villain_keys();
    root.insert(keyed.to_string(), Value::Object(as_mapping.clone()));
    root.insert(legacy_keyed.to_string(), Value::Object(as_mapping));
    root.insert(sequence.to_string(), Value::Array(as_sequence));

    Ok(Mutation {
        container: envelope.into_value(),
        value: next,
    })
}

fn villain_keys() -> [&'static str; 3] {
    match aliases::VILLAINS.keys() {
        [a, b, c] => [*a, *b, *c],
        _ => ["反派列表", "反派", "villains"],
    }
}

fn villain_value(villain: &Villain) -> Value {
    serde_json::to_value(villain).unwrap_or_else(|error| {
        tracing::warn!(id = %villain.id, error = %error, "Villain failed to serialize");
        Value::Object(Map::new())
    })
}

/// Write `modes` as a boolean map over every known mode.
///
/// The baseline is always written as `true`.
pub fn write_modes(container: Value, modes: &ActiveModes) -> Value {
    let flags: Map<String, Value> = modes
        .flags()
        .into_iter()
        .map(|(mode, enabled)| (mode.host_token().to_string(), Value::Bool(enabled)))
        .collect();

    let mut envelope = HostEnvelope::from_value(container);
    let written_to = aliases::MODES.write_exclusive(envelope.root_mut(), Value::Object(flags));
    tracing::debug!(modes_key = written_to, "Game modes written");
    envelope.into_value()
}

/// Add `mode` to `current` and write the result. Modes are never removed.
pub fn add_mode(container: Value, current: &ActiveModes, mode: GameMode) -> Mutation<ActiveModes> {
    let next = current.with(mode);
    Mutation {
        container: write_modes(container, &next),
        value: next,
    }
}
