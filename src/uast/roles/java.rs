//! Java (tree-sitter-java node kinds).

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "program" => &[Role::File],
    "package_declaration" => &[Role::Package],
    "import_declaration" => &[Role::Import],
    "identifier" => &[Role::Identifier],
    "type_identifier" => &[Role::Type],
    "string_literal" => &[Role::String, Role::Literal],
    "decimal_integer_literal" => &[Role::Number, Role::Literal],
    "decimal_floating_point_literal" => &[Role::Number, Role::Literal],
    "true" => &[Role::Boolean, Role::Literal],
    "false" => &[Role::Boolean, Role::Literal],
    "null_literal" => &[Role::Null, Role::Literal],
    "line_comment" => &[Role::Comment],
    "block_comment" => &[Role::Comment],
    "method_declaration" => &[Role::FunctionDeclaration],
    "constructor_declaration" => &[Role::FunctionDeclaration],
    "formal_parameters" => &[Role::Parameter],
    "formal_parameter" => &[Role::Parameter],
    "argument_list" => &[Role::Argument],
    "method_invocation" => &[Role::Call, Role::Expression],
    "object_creation_expression" => &[Role::Call, Role::Expression],
    "class_declaration" => &[Role::TypeDeclaration],
    "interface_declaration" => &[Role::TypeDeclaration],
    "enum_declaration" => &[Role::TypeDeclaration],
    "record_declaration" => &[Role::TypeDeclaration],
    "local_variable_declaration" => &[Role::VariableDeclaration, Role::Statement],
    "field_declaration" => &[Role::VariableDeclaration],
    "assignment_expression" => &[Role::Assignment, Role::Expression],
    "return_statement" => &[Role::Return, Role::Statement],
    "if_statement" => &[Role::If, Role::Statement],
    "ternary_expression" => &[Role::If, Role::Expression],
    "for_statement" => &[Role::Loop, Role::Statement],
    "enhanced_for_statement" => &[Role::Loop, Role::Statement],
    "while_statement" => &[Role::Loop, Role::Statement],
    "do_statement" => &[Role::Loop, Role::Statement],
    "switch_expression" => &[Role::Switch],
    "try_statement" => &[Role::Try, Role::Statement],
    "catch_clause" => &[Role::Catch],
    "throw_statement" => &[Role::Throw, Role::Statement],
    "block" => &[Role::Block],
    "class_body" => &[Role::Block],
    "expression_statement" => &[Role::Statement],
    "binary_expression" => &[Role::Binary, Role::Expression],
    "unary_expression" => &[Role::Unary, Role::Expression],
    "update_expression" => &[Role::Unary, Role::Expression],
    "field_access" => &[Role::Member, Role::Expression],
    "lambda_expression" => &[Role::Lambda, Role::Expression],
    "break_statement" => &[Role::Break, Role::Statement],
    "continue_statement" => &[Role::Continue, Role::Statement],
};
