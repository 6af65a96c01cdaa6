//! Atomic compositions and the user-defined component registry.

use super::element::Element;
use crate::gudrun::error::SerializeError;
use serde::{Deserialize, Serialize};

/// A named, reusable mixture of elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    pub elements: Vec<Element>,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
        }
    }

    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }
}

/// Document-wide registry of [`Component`]s, referenced by name from compositions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    pub components: Vec<Component>,
}

impl Components {
    /// Add `component`, replacing any entry with the same name in place.
    pub fn insert(&mut self, component: Component) {
        match self.components.iter_mut().find(|c| c.name == component.name) {
            Some(existing) => *existing = component,
            None => self.components.push(component),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// A component's contribution to a composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedComponent {
    /// Name of the referenced entry in [`Components`].
    pub component: String,
    pub ratio: f64,
}

/// The atomic composition owned by a Normalisation, Sample or Container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// Owner label used in diagnostics.
    pub name: String,
    pub elements: Vec<Element>,
    #[serde(default)]
    pub weighted_components: Vec<WeightedComponent>,
}

impl Composition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Every weighted component that `registry` does not know about.
    pub fn dangling_components<'a>(
        &'a self,
        registry: &'a Components,
    ) -> impl Iterator<Item = &'a WeightedComponent> {
        self.weighted_components
            .iter()
            .filter(|wc| registry.get(&wc.component).is_none())
    }

    /// Rebuild `elements` from the weighted components.
    ///
    /// Each component element contributes `abundance * ratio`; elements with the same
    /// symbol and mass number are merged, keeping first-seen order.
    pub fn translate(&mut self, registry: &Components) -> Result<(), SerializeError> {
        let mut merged: Vec<Element> = Vec::new();
        for weighted in &self.weighted_components {
            let component =
                registry
                    .get(&weighted.component)
                    .ok_or_else(|| SerializeError::UnknownComponent {
                        owner: self.name.clone(),
                        component: weighted.component.clone(),
                    })?;
            for element in &component.elements {
                let contribution = element.abundance * weighted.ratio;
                match merged.iter_mut().find(|e| {
                    e.atomic_symbol == element.atomic_symbol
                        && e.mass_number == element.mass_number
                }) {
                    Some(existing) => existing.abundance += contribution,
                    None => merged.push(Element::new(
                        element.atomic_symbol.clone(),
                        element.mass_number,
                        contribution,
                    )),
                }
            }
        }
        self.elements = merged;
        Ok(())
    }
}
