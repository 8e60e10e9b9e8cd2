use std::collections::HashMap;

use crate::{
    ast::{
        ast::{FnDef, Program, TypeDef},
        types::Type,
    },
    errors::errors::{Namespace, TypeError},
};

/// Lookup tables for everything defined at the top level of a program.
///
/// Built once per program before any expression is checked, so function
/// bodies can refer to every function (including themselves) and every ADT
/// regardless of definition order.
#[derive(Debug, Default)]
pub struct StaticEnvironment {
    /// (type name, constructor name) -> field types
    constructors: HashMap<(String, String), Vec<Type>>,
    /// type name -> constructor names in declaration order
    adts: HashMap<String, Vec<String>>,
    /// function name -> `param -> result`
    functions: HashMap<String, Type>,
}

impl StaticEnvironment {
    /// Builds the tables for `program`.
    ///
    /// Never fails: name collisions and references to undeclared types are
    /// returned as errors next to the (first-definition-wins) environment.
    pub fn build(program: &Program) -> (Self, Vec<TypeError>) {
        let mut environment = StaticEnvironment::default();
        let mut errors = vec![];

        for type_def in program.type_defs.iter() {
            errors.extend(environment.declare_type(type_def));
        }

        for fn_def in program.fn_defs.iter() {
            if let Err(error) = environment.declare_function(fn_def) {
                errors.push(error);
            }
        }

        // Every name is known now, so annotations can be validated
        for type_def in program.type_defs.iter() {
            for constructor in type_def.constructors.iter() {
                for field in constructor.fields.iter() {
                    errors.extend(environment.validate_type(field));
                }
            }
        }

        for fn_def in program.fn_defs.iter() {
            errors.extend(environment.validate_type(&fn_def.param_type));
            errors.extend(environment.validate_type(&fn_def.result_type));
        }

        log::debug!(
            "static environment: {} types, {} constructors, {} functions, {} errors",
            environment.adts.len(),
            environment.constructors.len(),
            environment.functions.len(),
            errors.len()
        );

        (environment, errors)
    }

    /// Declares an ADT and its constructors. A duplicate ADT is skipped
    /// entirely; a duplicate constructor keeps the first field list.
    pub fn declare_type(&mut self, type_def: &TypeDef) -> Vec<TypeError> {
        if self.adts.contains_key(&type_def.name) {
            return vec![TypeError::DuplicateDefinition {
                namespace: Namespace::Type,
                name: type_def.name.clone(),
            }];
        }

        let mut errors = vec![];
        let mut names = vec![];

        for constructor in type_def.constructors.iter() {
            let key = (type_def.name.clone(), constructor.name.clone());
            if self.constructors.contains_key(&key) {
                errors.push(TypeError::DuplicateDefinition {
                    namespace: Namespace::Constructor,
                    name: format!("{}::{}", type_def.name, constructor.name),
                });
                continue;
            }

            self.constructors.insert(key, constructor.fields.clone());
            names.push(constructor.name.clone());
        }

        self.adts.insert(type_def.name.clone(), names);
        errors
    }

    pub fn declare_function(&mut self, fn_def: &FnDef) -> Result<(), TypeError> {
        if self.functions.contains_key(&fn_def.name) {
            Err(TypeError::DuplicateDefinition {
                namespace: Namespace::Function,
                name: fn_def.name.clone(),
            })
        } else {
            self.functions.insert(fn_def.name.clone(), fn_def.signature());
            Ok(())
        }
    }

    /// One `UnknownType` per reference to an undeclared ADT.
    pub fn validate_type(&self, ty: &Type) -> Vec<TypeError> {
        ty.referenced_adts()
            .into_iter()
            .filter(|name| !self.adts.contains_key(*name))
            .map(|name| TypeError::UnknownType {
                name: name.to_string(),
            })
            .collect()
    }

    pub fn get_constructor(&self, type_name: &str, constructor: &str) -> Option<&Vec<Type>> {
        self.constructors.get(&(type_name.to_string(), constructor.to_string()))
    }

    pub fn get_adt(&self, type_name: &str) -> Option<&Vec<String>> {
        self.adts.get(type_name)
    }

    pub fn get_function(&self, name: &str) -> Option<&Type> {
        self.functions.get(name)
    }
}
