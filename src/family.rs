//! Families of kernels addressed by configuration id.
//!
//! A [`KernelFamily`] is the cross product of a length axis, a direction axis and an element
//! type axis. Every combination has a dense id; [`KernelFamily::select`] turns an id back
//! into a ready plan. Plans are built on first selection and shared process-wide, keyed by
//! configuration and options, so selecting the same kernel twice is a lookup.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::enumerate::{Axis, Enumeration};
use crate::error::FftError;
use crate::options::Options;
use crate::planner::{Direction, ElementType, KernelHandle};

/// One member of a kernel family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub len: usize,
    pub direction: Direction,
    pub element: ElementType,
}

/// A single option on one of the axes of a family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Setting {
    Length(usize),
    Direction(Direction),
    Element(ElementType),
}

type HandleCache = Mutex<HashMap<(Configuration, Options), Arc<KernelHandle>>>;

fn cache() -> &'static HandleCache {
    static CACHE: OnceLock<HandleCache> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

#[derive(Clone, Debug)]
pub struct KernelFamily {
    enumeration: Enumeration<Setting>,
    options: Options,
}

impl KernelFamily {
    pub fn new(
        lengths: Axis<usize>,
        directions: &[Direction],
        elements: &[ElementType],
        options: Options,
    ) -> Self {
        let axes = [
            lengths.map(|len| Setting::Length(*len)),
            Axis::values(directions.iter().copied().map(Setting::Direction)),
            Axis::values(elements.iter().copied().map(Setting::Element)),
        ];
        Self {
            enumeration: Enumeration::new(&axes),
            options,
        }
    }

    pub fn len(&self) -> usize {
        self.enumeration.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enumeration.is_empty()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Every configuration of the family with its id, in increasing id order.
    pub fn configurations(&self) -> Vec<(Configuration, usize)> {
        self.enumeration
            .iter()
            .filter_map(|(settings, id)| to_configuration(&settings).map(|c| (c, id)))
            .collect()
    }

    /// The configuration behind `id`.
    ///
    /// # Errors
    ///
    /// [`FftError::InvalidConfigurationId`] if `id` is out of range.
    pub fn configuration(&self, id: usize) -> Result<Configuration, FftError> {
        let settings = self.enumeration.decode(id)?;
        to_configuration(&settings).ok_or(FftError::InvalidConfigurationId {
            id,
            count: self.len(),
        })
    }

    /// The id of `configuration`, if it belongs to the family.
    pub fn id_of(&self, configuration: &Configuration) -> Option<usize> {
        self.configurations()
            .into_iter()
            .find(|(c, _)| c == configuration)
            .map(|(_, id)| id)
    }

    /// The kernel for configuration `id`.
    ///
    /// # Errors
    ///
    /// [`FftError::InvalidConfigurationId`] if `id` is out of range, and any error of
    /// building the plan.
    pub fn select(&self, id: usize) -> Result<Arc<KernelHandle>, FftError> {
        let configuration = self.configuration(id)?;
        let key = (configuration, self.options.clone());
        if let Some(hit) = cache().lock().ok().and_then(|map| map.get(&key).cloned()) {
            return Ok(hit);
        }

        let handle = Arc::new(KernelHandle::build(
            configuration.len,
            configuration.direction,
            configuration.element,
            &self.options,
        )?);
        Ok(match cache().lock() {
            Ok(mut map) => Arc::clone(map.entry(key).or_insert(handle)),
            Err(_) => handle,
        })
    }
}

fn to_configuration(settings: &[Setting]) -> Option<Configuration> {
    match settings {
        [Setting::Length(len), Setting::Direction(direction), Setting::Element(element)] => {
            Some(Configuration {
                len: *len,
                direction: *direction,
                element: *element,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> KernelFamily {
        KernelFamily::new(
            Axis::values([8, 12, 30]),
            &[Direction::Forward, Direction::Inverse],
            &[ElementType::F32, ElementType::F64],
            Options::default(),
        )
    }

    #[test]
    fn select_inverts_the_enumeration() {
        let family = family();
        let configurations = family.configurations();
        assert_eq!(configurations.len(), 12);
        for (configuration, id) in configurations {
            let handle = family.select(id).unwrap();
            assert_eq!(handle.len(), configuration.len);
            assert_eq!(handle.direction(), configuration.direction);
            assert_eq!(handle.element_type(), configuration.element);
            assert_eq!(family.id_of(&configuration), Some(id));
        }
    }

    #[test]
    fn ids_are_dense_and_ordered() {
        let family = family();
        let first = family.configuration(0).unwrap();
        assert_eq!(
            first,
            Configuration {
                len: 8,
                direction: Direction::Forward,
                element: ElementType::F32
            }
        );
        let last = family.configuration(11).unwrap();
        assert_eq!(last.len, 30);
        assert_eq!(last.element, ElementType::F64);
    }

    #[test]
    fn selection_is_cached() {
        let family = family();
        let a = family.select(5).unwrap();
        let b = family.select(5).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn out_of_range_selection_fails() {
        assert_eq!(
            family().select(12).unwrap_err(),
            FftError::InvalidConfigurationId { id: 12, count: 12 }
        );
    }

    #[test]
    fn power_families() {
        let family = KernelFamily::new(
            Axis::powers(2, 1, 10).chain(Axis::powers(3, 1, 5)),
            &[Direction::Forward],
            &[ElementType::F64],
            Options::default(),
        );
        assert_eq!(family.len(), 15);
        let handle = family.select(14).unwrap();
        assert_eq!(handle.len(), 243);
    }
}
