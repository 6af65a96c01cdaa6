//! The `COMPONENTS:` section at the end of a file.
//!
//! One group per component, running to the end of input:
//!
//!     Water
//!     (
//!     H  0  2.0
//!     O  0  1.0
//!     )

use crate::gudrun::cursor::{is_blank, LineCursor};
use crate::gudrun::error::{
    LineError, MalformedLineError, RecordKind, RecordParseError, SerializeError,
};
use crate::gudrun::model::{is_known_symbol, Component, Components, Element};
use crate::gudrun::scalars;
use crate::gudrun::schema::{render, SPC2};
use tracing::{debug, warn};

fn read_component_row(row: &str) -> Result<Element, LineError> {
    let tokens = row.split_whitespace().count();
    if tokens != 3 {
        return Err(MalformedLineError::new(row, tokens.min(3), "component element").into());
    }
    Ok(Element::new(
        scalars::first_word(row)?,
        scalars::nth_mass_number(row, 1)?,
        scalars::nth_float(row, 2)?,
    ))
}

/// Read component groups until the input is exhausted. Components are keyed by name; a
/// later group replaces an earlier one with the same name.
pub fn parse_components(cursor: &mut LineCursor<'_>) -> Result<Components, RecordParseError> {
    let mut components = Components::default();
    while let Some(line) = cursor.next_line() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if cursor.peek().is_some_and(|l| l.trim_start().starts_with('(')) {
            cursor.skip(1);
        } else {
            warn!(component = name, "component name without element group, skipping");
            continue;
        }

        let mut elements = Vec::new();
        while let Some(row) = cursor.next_line() {
            if row.trim_start().starts_with(')') {
                break;
            }
            if is_blank(row) {
                continue;
            }
            let element = read_component_row(row)
                .map_err(|cause| RecordParseError::new(RecordKind::Components, cause))?;
            elements.push(element);
        }
        if elements.is_empty() {
            warn!(component = name, "empty component group");
        }
        components.insert(Component::new(name).with_elements(elements));
    }
    debug!(count = components.len(), "parsed components");
    Ok(components)
}

/// Render every component group, or nothing when the registry is empty.
pub fn write_components(components: &Components) -> Result<String, SerializeError> {
    let mut groups = Vec::with_capacity(components.len());
    for component in components.iter() {
        let name = component.name.as_str();
        if name.is_empty() || name.trim() != name || name.starts_with(['(', ')']) {
            return Err(SerializeError::InvalidToken {
                field: "component name",
                value: component.name.clone(),
            });
        }
        let mut lines = vec![name.to_string(), "(".to_string()];
        for element in &component.elements {
            if !is_known_symbol(&element.atomic_symbol) {
                return Err(SerializeError::UnknownElement {
                    owner: component.name.clone(),
                    symbol: element.atomic_symbol.clone(),
                });
            }
            if element.abundance < 0.0 {
                return Err(SerializeError::NegativeAbundance {
                    owner: component.name.clone(),
                    symbol: element.atomic_symbol.clone(),
                    abundance: element.abundance,
                });
            }
            lines.push(
                [
                    element.atomic_symbol.clone(),
                    render(&element.mass_number),
                    render(&element.abundance),
                ]
                .join(SPC2),
            );
        }
        lines.push(")".to_string());
        groups.push(lines.join("\n"));
    }
    Ok(groups.join("\n"))
}
