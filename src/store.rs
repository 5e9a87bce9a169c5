//! Label-keyed store for values passed between pipeline stages.
//!
//! The surrounding reconstruction chain hands intermediate results (start
//! position, centre, principal axes, directions) from one stage to the next by
//! label, each optionally paired with an uncertainty. The estimation functions
//! in this crate never touch the store; [`crate::estimator`] marshals values in
//! and out of it.

use crate::pca::CovarianceResult;
use crate::types::{Direction, Point};
use std::collections::HashMap;

/// Value kinds the store can hold.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementValue {
    Scalar(f64),
    Point(Point),
    Vector(Direction),
    Axes(Box<CovarianceResult>),
}

impl ElementValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ElementValue::Scalar(_) => "scalar",
            ElementValue::Point(_) => "point",
            ElementValue::Vector(_) => "vector",
            ElementValue::Axes(_) => "axes",
        }
    }
}

/// Stored value and its optional uncertainty.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredElement {
    pub value: ElementValue,
    pub uncertainty: Option<ElementValue>,
}

/// Conversion between Rust types and [`ElementValue`].
pub trait StoreElement: Sized {
    const KIND: &'static str;
    fn into_value(self) -> ElementValue;
    fn from_value(value: &ElementValue) -> Option<Self>;
}

impl StoreElement for f64 {
    const KIND: &'static str = "scalar";
    fn into_value(self) -> ElementValue {
        ElementValue::Scalar(self)
    }
    fn from_value(value: &ElementValue) -> Option<Self> {
        match value {
            ElementValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

impl StoreElement for Point {
    const KIND: &'static str = "point";
    fn into_value(self) -> ElementValue {
        ElementValue::Point(self)
    }
    fn from_value(value: &ElementValue) -> Option<Self> {
        match value {
            ElementValue::Point(p) => Some(*p),
            _ => None,
        }
    }
}

impl StoreElement for Direction {
    const KIND: &'static str = "vector";
    fn into_value(self) -> ElementValue {
        ElementValue::Vector(self)
    }
    fn from_value(value: &ElementValue) -> Option<Self> {
        match value {
            ElementValue::Vector(v) => Some(*v),
            _ => None,
        }
    }
}

impl StoreElement for CovarianceResult {
    const KIND: &'static str = "axes";
    fn into_value(self) -> ElementValue {
        ElementValue::Axes(Box::new(self))
    }
    fn from_value(value: &ElementValue) -> Option<Self> {
        match value {
            ElementValue::Axes(axes) => Some((**axes).clone()),
            _ => None,
        }
    }
}

/// Reasons a store lookup may fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    Missing {
        label: String,
    },
    TypeMismatch {
        label: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Missing { label } => write!(f, "element `{label}` is not set"),
            StoreError::TypeMismatch {
                label,
                expected,
                found,
            } => write!(f, "element `{label}` holds a {found}, expected a {expected}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Clone, Debug, Default)]
pub struct ElementStore {
    elements: HashMap<String, StoredElement>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, label: &str) -> bool {
        self.elements.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn set<T: StoreElement>(&mut self, label: impl Into<String>, value: T) {
        self.elements.insert(
            label.into(),
            StoredElement {
                value: value.into_value(),
                uncertainty: None,
            },
        );
    }

    pub fn set_with_uncertainty<T: StoreElement>(
        &mut self,
        label: impl Into<String>,
        value: T,
        uncertainty: T,
    ) {
        self.elements.insert(
            label.into(),
            StoredElement {
                value: value.into_value(),
                uncertainty: Some(uncertainty.into_value()),
            },
        );
    }

    pub fn get<T: StoreElement>(&self, label: &str) -> Result<T, StoreError> {
        let element = self.element(label)?;
        convert(label, &element.value)
    }

    /// Value and uncertainty; the uncertainty is `None` if none was stored.
    pub fn get_with_uncertainty<T: StoreElement>(
        &self,
        label: &str,
    ) -> Result<(T, Option<T>), StoreError> {
        let element = self.element(label)?;
        let value = convert(label, &element.value)?;
        let uncertainty = element
            .uncertainty
            .as_ref()
            .map(|u| convert(label, u))
            .transpose()?;
        Ok((value, uncertainty))
    }

    fn element(&self, label: &str) -> Result<&StoredElement, StoreError> {
        self.elements.get(label).ok_or_else(|| StoreError::Missing {
            label: label.to_string(),
        })
    }
}

fn convert<T: StoreElement>(label: &str, value: &ElementValue) -> Result<T, StoreError> {
    T::from_value(value).ok_or_else(|| StoreError::TypeMismatch {
        label: label.to_string(),
        expected: T::KIND,
        found: value.kind(),
    })
}
