//! PHP (tree-sitter-php node kinds).

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "program" => &[Role::File],
    "namespace_definition" => &[Role::Package],
    "namespace_use_declaration" => &[Role::Import],
    "name" => &[Role::Identifier],
    "variable_name" => &[Role::Identifier],
    "string" => &[Role::String, Role::Literal],
    "encapsed_string" => &[Role::String, Role::Literal],
    "integer" => &[Role::Number, Role::Literal],
    "float" => &[Role::Number, Role::Literal],
    "boolean" => &[Role::Boolean, Role::Literal],
    "null" => &[Role::Null, Role::Literal],
    "comment" => &[Role::Comment],
    "function_definition" => &[Role::FunctionDeclaration, Role::Statement],
    "method_declaration" => &[Role::FunctionDeclaration],
    "formal_parameters" => &[Role::Parameter],
    "simple_parameter" => &[Role::Parameter],
    "arguments" => &[Role::Argument],
    "argument" => &[Role::Argument],
    "function_call_expression" => &[Role::Call, Role::Expression],
    "member_call_expression" => &[Role::Call, Role::Expression],
    "scoped_call_expression" => &[Role::Call, Role::Expression],
    "object_creation_expression" => &[Role::Call, Role::Expression],
    "class_declaration" => &[Role::TypeDeclaration, Role::Statement],
    "interface_declaration" => &[Role::TypeDeclaration, Role::Statement],
    "trait_declaration" => &[Role::TypeDeclaration, Role::Statement],
    "assignment_expression" => &[Role::Assignment, Role::Expression],
    "return_statement" => &[Role::Return, Role::Statement],
    "if_statement" => &[Role::If, Role::Statement],
    "else_clause" => &[Role::If],
    "for_statement" => &[Role::Loop, Role::Statement],
    "foreach_statement" => &[Role::Loop, Role::Statement],
    "while_statement" => &[Role::Loop, Role::Statement],
    "switch_statement" => &[Role::Switch, Role::Statement],
    "try_statement" => &[Role::Try, Role::Statement],
    "catch_clause" => &[Role::Catch],
    "throw_expression" => &[Role::Throw, Role::Expression],
    "compound_statement" => &[Role::Block],
    "expression_statement" => &[Role::Statement],
    "echo_statement" => &[Role::Statement],
    "binary_expression" => &[Role::Binary, Role::Expression],
    "unary_op_expression" => &[Role::Unary, Role::Expression],
    "member_access_expression" => &[Role::Member, Role::Expression],
    "anonymous_function" => &[Role::Lambda, Role::Expression],
    "arrow_function" => &[Role::Lambda, Role::Expression],
    "break_statement" => &[Role::Break, Role::Statement],
    "continue_statement" => &[Role::Continue, Role::Statement],
};
