//! JavaScript (tree-sitter-javascript node kinds). Also the fallback for TypeScript.

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "program" => &[Role::File],
    "identifier" => &[Role::Identifier],
    "property_identifier" => &[Role::Identifier],
    "shorthand_property_identifier" => &[Role::Identifier],
    "string" => &[Role::String, Role::Literal],
    "template_string" => &[Role::String, Role::Literal],
    "number" => &[Role::Number, Role::Literal],
    "true" => &[Role::Boolean, Role::Literal],
    "false" => &[Role::Boolean, Role::Literal],
    "null" => &[Role::Null, Role::Literal],
    "undefined" => &[Role::Null, Role::Literal],
    "comment" => &[Role::Comment],
    "function_declaration" => &[Role::FunctionDeclaration, Role::Statement],
    "generator_function_declaration" => &[Role::FunctionDeclaration, Role::Statement],
    "method_definition" => &[Role::FunctionDeclaration],
    "function_expression" => &[Role::Lambda, Role::Expression],
    "arrow_function" => &[Role::Lambda, Role::Expression],
    "formal_parameters" => &[Role::Parameter],
    "arguments" => &[Role::Argument],
    "call_expression" => &[Role::Call, Role::Expression],
    "new_expression" => &[Role::Call, Role::Expression],
    "class_declaration" => &[Role::TypeDeclaration, Role::Statement],
    "lexical_declaration" => &[Role::VariableDeclaration, Role::Statement],
    "variable_declaration" => &[Role::VariableDeclaration, Role::Statement],
    "variable_declarator" => &[Role::VariableDeclaration],
    "assignment_expression" => &[Role::Assignment, Role::Expression],
    "augmented_assignment_expression" => &[Role::Assignment, Role::Operator, Role::Expression],
    "import_statement" => &[Role::Import, Role::Statement],
    "export_statement" => &[Role::Statement],
    "return_statement" => &[Role::Return, Role::Statement],
    "if_statement" => &[Role::If, Role::Statement],
    "else_clause" => &[Role::If],
    "ternary_expression" => &[Role::If, Role::Expression],
    "for_statement" => &[Role::Loop, Role::Statement],
    "for_in_statement" => &[Role::Loop, Role::Statement],
    "while_statement" => &[Role::Loop, Role::Statement],
    "do_statement" => &[Role::Loop, Role::Statement],
    "switch_statement" => &[Role::Switch, Role::Statement],
    "try_statement" => &[Role::Try, Role::Statement],
    "catch_clause" => &[Role::Catch],
    "throw_statement" => &[Role::Throw, Role::Statement],
    "statement_block" => &[Role::Block],
    "expression_statement" => &[Role::Statement],
    "binary_expression" => &[Role::Binary, Role::Expression],
    "unary_expression" => &[Role::Unary, Role::Expression],
    "update_expression" => &[Role::Unary, Role::Expression],
    "member_expression" => &[Role::Member, Role::Expression],
    "subscript_expression" => &[Role::Member, Role::Expression],
    "break_statement" => &[Role::Break, Role::Statement],
    "continue_statement" => &[Role::Continue, Role::Statement],
};
