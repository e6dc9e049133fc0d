//! Shell, for drivers emitting tree-sitter-bash node kinds.

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "program" => &[Role::File],
    "command" => &[Role::Call, Role::Statement],
    "command_name" => &[Role::Identifier],
    "variable_name" => &[Role::Identifier],
    "word" => &[Role::Literal],
    "string" => &[Role::String, Role::Literal],
    "raw_string" => &[Role::String, Role::Literal],
    "number" => &[Role::Number, Role::Literal],
    "comment" => &[Role::Comment],
    "function_definition" => &[Role::FunctionDeclaration],
    "variable_assignment" => &[Role::Assignment],
    "declaration_command" => &[Role::VariableDeclaration, Role::Statement],
    "if_statement" => &[Role::If, Role::Statement],
    "elif_clause" => &[Role::If],
    "else_clause" => &[Role::If],
    "for_statement" => &[Role::Loop, Role::Statement],
    "c_style_for_statement" => &[Role::Loop, Role::Statement],
    "while_statement" => &[Role::Loop, Role::Statement],
    "case_statement" => &[Role::Switch, Role::Statement],
    "compound_statement" => &[Role::Block],
    "pipeline" => &[Role::Expression],
    "binary_expression" => &[Role::Binary, Role::Expression],
    "unary_expression" => &[Role::Unary, Role::Expression],
    "test_command" => &[Role::Expression],
};
