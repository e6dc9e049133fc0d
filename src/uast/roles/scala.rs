//! Scala (tree-sitter-scala node kinds).

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "compilation_unit" => &[Role::File],
    "package_clause" => &[Role::Package],
    "import_declaration" => &[Role::Import],
    "identifier" => &[Role::Identifier],
    "type_identifier" => &[Role::Type],
    "string" => &[Role::String, Role::Literal],
    "integer_literal" => &[Role::Number, Role::Literal],
    "floating_point_literal" => &[Role::Number, Role::Literal],
    "boolean_literal" => &[Role::Boolean, Role::Literal],
    "null_literal" => &[Role::Null, Role::Literal],
    "comment" => &[Role::Comment],
    "function_definition" => &[Role::FunctionDeclaration],
    "parameters" => &[Role::Parameter],
    "parameter" => &[Role::Parameter],
    "arguments" => &[Role::Argument],
    "call_expression" => &[Role::Call, Role::Expression],
    "class_definition" => &[Role::TypeDeclaration],
    "object_definition" => &[Role::TypeDeclaration],
    "trait_definition" => &[Role::TypeDeclaration],
    "val_definition" => &[Role::VariableDeclaration],
    "var_definition" => &[Role::VariableDeclaration],
    "assignment_expression" => &[Role::Assignment, Role::Expression],
    "return_expression" => &[Role::Return, Role::Expression],
    "if_expression" => &[Role::If, Role::Expression],
    "while_expression" => &[Role::Loop, Role::Expression],
    "for_expression" => &[Role::Loop, Role::Expression],
    "match_expression" => &[Role::Switch, Role::Expression],
    "try_expression" => &[Role::Try, Role::Expression],
    "catch_clause" => &[Role::Catch],
    "throw_expression" => &[Role::Throw, Role::Expression],
    "block" => &[Role::Block],
    "template_body" => &[Role::Block],
    "infix_expression" => &[Role::Binary, Role::Expression],
    "prefix_expression" => &[Role::Unary, Role::Expression],
    "field_expression" => &[Role::Member, Role::Expression],
    "lambda_expression" => &[Role::Lambda, Role::Expression],
};
