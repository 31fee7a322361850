//! Dynamic method list of a module: unique naming, editing, and invocation by name.

pub mod action;
pub mod child_list;
pub mod item;
pub mod params;

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use crate::name_generator::NameGenerator;

use self::{
    action::{ActionFuture, MethodAction},
    child_list::{ChildList, ListChild, ListError},
    item::{MethodItemView, MethodListItem, MethodPropertyView, MethodTestView},
    params::ParamSpec,
};

const METHOD_BASE_NAME: &str = "method";
const PARAM_BASE_NAME: &str = "param";

#[derive(Debug, Default)]
pub struct MethodList {
    items: ChildList<MethodListItem>,
}

impl MethodList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current names in display order.
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a method with a fresh unique name and returns that name.
    pub fn add(&mut self) -> String {
        let name = NameGenerator::init(self.names()).gen_item_name(METHOD_BASE_NAME);
        debug!("Adding method '{}'", name);
        self.items.push(MethodListItem::new(name.clone()));
        name
    }

    /// Appends a preconfigured method. Empty or colliding names are replaced
    /// by a generated one so the creation-time invariant still holds.
    pub fn add_item(&mut self, mut item: MethodListItem) -> String {
        let base = item.name.trim().to_string();
        let base = if base.is_empty() {
            METHOD_BASE_NAME.to_string()
        } else {
            base
        };
        item.name = NameGenerator::init(self.names()).gen_item_name(&base);
        let name = item.name.clone();
        self.items.push(item);
        name
    }

    pub fn delete(&mut self, index: usize) -> Result<MethodListItem, ListError> {
        let removed = self.items.delete(index)?;
        debug!("Deleted method '{}' at index {}", removed.name, index);
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Result<&MethodListItem, ListError> {
        self.items.get(index)
    }

    /// First item whose name matches; duplicates resolve to the earliest one.
    pub fn find_by_name(&self, name: &str) -> Option<&MethodListItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Runs the named method. `None` means no method has that name and
    /// nothing was done.
    pub fn execute_by_name(&self, name: &str, params: Vec<Value>) -> Option<ActionFuture> {
        let Some(item) = self.find_by_name(name) else {
            debug!("Ignoring execute for unknown method '{}'", name);
            return None;
        };
        Some(item.execute(params))
    }

    pub fn rename(&mut self, index: usize, name: &str) -> Result<(), ListError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ListError::EmptyName);
        }
        let collides = self
            .items
            .iter()
            .enumerate()
            .any(|(other_index, item)| other_index != index && item.name == name);
        let item = self.items.get_mut(index)?;
        if collides {
            warn!(
                "Method '{}' renamed to '{}', which another method already uses",
                item.name, name
            );
        }
        item.name = name.to_string();
        Ok(())
    }

    pub fn set_action(
        &mut self,
        index: usize,
        action: Option<Arc<dyn MethodAction>>,
    ) -> Result<(), ListError> {
        self.items.get_mut(index)?.action = action;
        Ok(())
    }

    /// Appends a parameter with a key unique within the method; returns the key.
    pub fn add_param(&mut self, index: usize) -> Result<String, ListError> {
        let item = self.items.get_mut(index)?;
        let key = NameGenerator::init(item.params.iter().map(|param| param.key.clone()))
            .gen_item_name(PARAM_BASE_NAME);
        item.params.push(ParamSpec::new(key.clone()));
        Ok(key)
    }

    pub fn delete_param(&mut self, index: usize, param_index: usize) -> Result<ParamSpec, ListError> {
        let item = self.items.get_mut(index)?;
        if param_index >= item.params.len() {
            return Err(ListError::OutOfRange {
                index: param_index,
                len: item.params.len(),
            });
        }
        Ok(item.params.remove(param_index))
    }

    pub fn rename_param(
        &mut self,
        index: usize,
        param_index: usize,
        key: &str,
    ) -> Result<(), ListError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ListError::EmptyName);
        }
        self.param_mut(index, param_index)?.key = key.to_string();
        Ok(())
    }

    pub fn set_param_required(
        &mut self,
        index: usize,
        param_index: usize,
        required: bool,
    ) -> Result<(), ListError> {
        self.param_mut(index, param_index)?.required = required;
        Ok(())
    }

    pub fn set_param_test_value(
        &mut self,
        index: usize,
        param_index: usize,
        raw: &str,
    ) -> Result<(), ListError> {
        self.param_mut(index, param_index)?.test_value = raw.to_string();
        Ok(())
    }

    /// Live test values of the method at `index`, in parameter order.
    pub fn test_params(&self, index: usize) -> Result<Vec<Value>, ListError> {
        Ok(params::test_params(&self.items.get(index)?.params_data()))
    }

    /// Runs the method at `index` with its test values, resolving it by name.
    pub fn test_execute(&self, index: usize) -> Result<Option<ActionFuture>, ListError> {
        let name = self.items.get(index)?.name.clone();
        let params = self.test_params(index)?;
        Ok(self.execute_by_name(&name, params))
    }

    pub fn views(&self) -> Vec<MethodItemView> {
        self.items.views()
    }

    pub fn property_views(&self) -> Vec<MethodPropertyView> {
        self.items.property_views()
    }

    pub fn test_views(&self) -> Vec<MethodTestView> {
        self.items.iter().map(MethodListItem::test_view).collect()
    }

    fn param_mut(&mut self, index: usize, param_index: usize) -> Result<&mut ParamSpec, ListError> {
        let item = self.items.get_mut(index)?;
        let len = item.params.len();
        item.params.get_mut(param_index).ok_or(ListError::OutOfRange {
            index: param_index,
            len,
        })
    }
}
