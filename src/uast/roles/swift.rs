//! Swift (tree-sitter-swift node kinds).

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "source_file" => &[Role::File],
    "import_declaration" => &[Role::Import],
    "simple_identifier" => &[Role::Identifier],
    "type_identifier" => &[Role::Type],
    "line_string_literal" => &[Role::String, Role::Literal],
    "integer_literal" => &[Role::Number, Role::Literal],
    "real_literal" => &[Role::Number, Role::Literal],
    "boolean_literal" => &[Role::Boolean, Role::Literal],
    "comment" => &[Role::Comment],
    "multiline_comment" => &[Role::Comment],
    "function_declaration" => &[Role::FunctionDeclaration],
    "parameter" => &[Role::Parameter],
    "value_arguments" => &[Role::Argument],
    "value_argument" => &[Role::Argument],
    "call_expression" => &[Role::Call, Role::Expression],
    "class_declaration" => &[Role::TypeDeclaration],
    "protocol_declaration" => &[Role::TypeDeclaration],
    "property_declaration" => &[Role::VariableDeclaration],
    "assignment" => &[Role::Assignment],
    "control_transfer_statement" => &[Role::Statement],
    "if_statement" => &[Role::If, Role::Statement],
    "guard_statement" => &[Role::If, Role::Statement],
    "for_statement" => &[Role::Loop, Role::Statement],
    "while_statement" => &[Role::Loop, Role::Statement],
    "repeat_while_statement" => &[Role::Loop, Role::Statement],
    "switch_statement" => &[Role::Switch, Role::Statement],
    "do_statement" => &[Role::Try, Role::Statement],
    "catch_block" => &[Role::Catch],
    "statements" => &[Role::Block],
    "function_body" => &[Role::Block],
    "additive_expression" => &[Role::Binary, Role::Expression],
    "multiplicative_expression" => &[Role::Binary, Role::Expression],
    "comparison_expression" => &[Role::Binary, Role::Expression],
    "equality_expression" => &[Role::Binary, Role::Expression],
    "conjunction_expression" => &[Role::Binary, Role::Expression],
    "disjunction_expression" => &[Role::Binary, Role::Expression],
    "prefix_expression" => &[Role::Unary, Role::Expression],
    "navigation_expression" => &[Role::Member, Role::Expression],
    "lambda_literal" => &[Role::Lambda, Role::Expression],
};
