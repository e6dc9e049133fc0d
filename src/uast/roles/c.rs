//! C (tree-sitter-c node kinds). Also the fallback for C++.

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "translation_unit" => &[Role::File],
    "preproc_include" => &[Role::Import],
    "identifier" => &[Role::Identifier],
    "field_identifier" => &[Role::Identifier],
    "type_identifier" => &[Role::Type],
    "primitive_type" => &[Role::Type],
    "string_literal" => &[Role::String, Role::Literal],
    "char_literal" => &[Role::String, Role::Literal],
    "number_literal" => &[Role::Number, Role::Literal],
    "true" => &[Role::Boolean, Role::Literal],
    "false" => &[Role::Boolean, Role::Literal],
    "null" => &[Role::Null, Role::Literal],
    "comment" => &[Role::Comment],
    "function_definition" => &[Role::FunctionDeclaration],
    "declaration" => &[Role::VariableDeclaration, Role::Statement],
    "init_declarator" => &[Role::VariableDeclaration],
    "parameter_list" => &[Role::Parameter],
    "parameter_declaration" => &[Role::Parameter],
    "argument_list" => &[Role::Argument],
    "call_expression" => &[Role::Call, Role::Expression],
    "struct_specifier" => &[Role::TypeDeclaration],
    "union_specifier" => &[Role::TypeDeclaration],
    "enum_specifier" => &[Role::TypeDeclaration],
    "type_definition" => &[Role::TypeDeclaration],
    "assignment_expression" => &[Role::Assignment, Role::Expression],
    "return_statement" => &[Role::Return, Role::Statement],
    "if_statement" => &[Role::If, Role::Statement],
    "else_clause" => &[Role::If],
    "conditional_expression" => &[Role::If, Role::Expression],
    "for_statement" => &[Role::Loop, Role::Statement],
    "while_statement" => &[Role::Loop, Role::Statement],
    "do_statement" => &[Role::Loop, Role::Statement],
    "switch_statement" => &[Role::Switch, Role::Statement],
    "compound_statement" => &[Role::Block],
    "expression_statement" => &[Role::Statement],
    "binary_expression" => &[Role::Binary, Role::Expression],
    "unary_expression" => &[Role::Unary, Role::Expression],
    "pointer_expression" => &[Role::Unary, Role::Expression],
    "update_expression" => &[Role::Unary, Role::Expression],
    "field_expression" => &[Role::Member, Role::Expression],
    "subscript_expression" => &[Role::Member, Role::Expression],
    "break_statement" => &[Role::Break, Role::Statement],
    "continue_statement" => &[Role::Continue, Role::Statement],
};
