//! C++-only node kinds (tree-sitter-cpp); shared kinds come from the C table.

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "class_specifier" => &[Role::TypeDeclaration],
    "namespace_definition" => &[Role::Package],
    "using_declaration" => &[Role::Import],
    "qualified_identifier" => &[Role::Identifier],
    "namespace_identifier" => &[Role::Identifier],
    "lambda_expression" => &[Role::Lambda, Role::Expression],
    "try_statement" => &[Role::Try, Role::Statement],
    "catch_clause" => &[Role::Catch],
    "throw_statement" => &[Role::Throw, Role::Statement],
    "new_expression" => &[Role::Call, Role::Expression],
    "template_declaration" => &[Role::TypeDeclaration],
    "raw_string_literal" => &[Role::String, Role::Literal],
    "nullptr" => &[Role::Null, Role::Literal],
    "for_range_loop" => &[Role::Loop, Role::Statement],
    "field_declaration" => &[Role::VariableDeclaration],
    "access_specifier" => &[Role::Operator],
};
