//! TypeScript-only node kinds; everything else resolves through the JavaScript table.

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "type_annotation" => &[Role::Type],
    "type_identifier" => &[Role::Type],
    "predefined_type" => &[Role::Type],
    "interface_declaration" => &[Role::TypeDeclaration, Role::Statement],
    "type_alias_declaration" => &[Role::TypeDeclaration, Role::Statement],
    "enum_declaration" => &[Role::TypeDeclaration, Role::Statement],
    "abstract_class_declaration" => &[Role::TypeDeclaration, Role::Statement],
    "required_parameter" => &[Role::Parameter],
    "optional_parameter" => &[Role::Parameter],
    "function_signature" => &[Role::FunctionDeclaration, Role::Statement],
    "method_signature" => &[Role::FunctionDeclaration],
    "as_expression" => &[Role::Expression],
    "non_null_expression" => &[Role::Unary, Role::Expression],
};
