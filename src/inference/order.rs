use std::collections::HashSet;

use tracing::debug;

use super::registry::StructRegistry;

/// Topological order of the registered structs: every struct comes after the
/// structs it references.
///
/// Roots are visited in registration order, so independent structs keep a
/// stable order. A dependency that is still on the visiting stack closes a
/// cycle; it is skipped and the struct is emitted without waiting for it.
pub fn dependency_order(registry: &StructRegistry) -> Vec<String> {
    let mut walk = Walk {
        registry,
        visited: HashSet::new(),
        visiting: HashSet::new(),
        out: Vec::with_capacity(registry.len()),
    };
    for name in registry.names() {
        walk.visit(name);
    }
    walk.out
}

struct Walk<'a> {
    registry: &'a StructRegistry,
    visited: HashSet<&'a str>,
    visiting: HashSet<&'a str>,
    out: Vec<String>,
}

impl<'a> Walk<'a> {
    fn visit(&mut self, name: &'a str) {
        if self.visited.contains(name) {
            return;
        }
        if self.visiting.contains(name) {
            debug!(name, "dependency cycle broken");
            return;
        }
        self.visiting.insert(name);
        let registry = self.registry;
        for dep in registry.dependencies(name) {
            if registry.contains(dep) {
                self.visit(dep);
            }
        }
        self.visiting.remove(name);
        self.visited.insert(name);
        self.out.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FieldDefinition, StructDefinition, ThriftType};

    fn define(reg: &mut StructRegistry, name: &str, refs: &[ThriftType]) {
        let mut def = StructDefinition::new(name);
        for (ty, index) in refs.iter().zip(1u32..) {
            def.fields.push(FieldDefinition::new(name, index, &format!("f{index}"), ty.clone()));
        }
        reg.complete(def);
    }

    fn s(name: &str) -> ThriftType {
        ThriftType::Struct(name.to_string())
    }

    #[test]
    fn dependencies_come_first() {
        let mut reg = StructRegistry::new(false);
        // registered in reverse so the sort has to reorder
        define(&mut reg, "Order", &[]);
        define(&mut reg, "Customer", &[]);
        define(&mut reg, "Item", &[ThriftType::String]);
        define(&mut reg, "Order", &[s("Customer"), ThriftType::list_of(s("Item"))]);
        assert_eq!(dependency_order(&reg), vec!["Customer", "Item", "Order"]);
    }

    #[test]
    fn independent_structs_keep_registration_order() {
        let mut reg = StructRegistry::new(false);
        define(&mut reg, "B", &[]);
        define(&mut reg, "A", &[]);
        define(&mut reg, "C", &[]);
        assert_eq!(dependency_order(&reg), vec!["B", "A", "C"]);
    }

    #[test]
    fn cycles_are_broken_and_every_struct_emitted_once() {
        let mut reg = StructRegistry::new(false);
        define(&mut reg, "A", &[]);
        define(&mut reg, "B", &[]);
        define(&mut reg, "Node", &[]);
        define(&mut reg, "A", &[s("B")]);
        define(&mut reg, "B", &[s("A")]);
        define(&mut reg, "Node", &[s("Node")]);
        assert_eq!(dependency_order(&reg), vec!["B", "A", "Node"]);
    }

    #[test]
    fn empty_registry_orders_nothing() {
        assert!(dependency_order(&StructRegistry::new(false)).is_empty());
    }
}
