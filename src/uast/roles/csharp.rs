//! C# (tree-sitter-c-sharp node kinds).

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "compilation_unit" => &[Role::File],
    "using_directive" => &[Role::Import],
    "namespace_declaration" => &[Role::Package],
    "file_scoped_namespace_declaration" => &[Role::Package],
    "identifier" => &[Role::Identifier],
    "predefined_type" => &[Role::Type],
    "string_literal" => &[Role::String, Role::Literal],
    "verbatim_string_literal" => &[Role::String, Role::Literal],
    "interpolated_string_expression" => &[Role::String, Role::Literal],
    "integer_literal" => &[Role::Number, Role::Literal],
    "real_literal" => &[Role::Number, Role::Literal],
    "boolean_literal" => &[Role::Boolean, Role::Literal],
    "null_literal" => &[Role::Null, Role::Literal],
    "comment" => &[Role::Comment],
    "method_declaration" => &[Role::FunctionDeclaration],
    "constructor_declaration" => &[Role::FunctionDeclaration],
    "local_function_statement" => &[Role::FunctionDeclaration, Role::Statement],
    "parameter_list" => &[Role::Parameter],
    "parameter" => &[Role::Parameter],
    "argument_list" => &[Role::Argument],
    "argument" => &[Role::Argument],
    "invocation_expression" => &[Role::Call, Role::Expression],
    "object_creation_expression" => &[Role::Call, Role::Expression],
    "class_declaration" => &[Role::TypeDeclaration],
    "struct_declaration" => &[Role::TypeDeclaration],
    "interface_declaration" => &[Role::TypeDeclaration],
    "enum_declaration" => &[Role::TypeDeclaration],
    "record_declaration" => &[Role::TypeDeclaration],
    "local_declaration_statement" => &[Role::VariableDeclaration, Role::Statement],
    "field_declaration" => &[Role::VariableDeclaration],
    "variable_declaration" => &[Role::VariableDeclaration],
    "assignment_expression" => &[Role::Assignment, Role::Expression],
    "return_statement" => &[Role::Return, Role::Statement],
    "if_statement" => &[Role::If, Role::Statement],
    "conditional_expression" => &[Role::If, Role::Expression],
    "for_statement" => &[Role::Loop, Role::Statement],
    "foreach_statement" => &[Role::Loop, Role::Statement],
    "while_statement" => &[Role::Loop, Role::Statement],
    "do_statement" => &[Role::Loop, Role::Statement],
    "switch_statement" => &[Role::Switch, Role::Statement],
    "try_statement" => &[Role::Try, Role::Statement],
    "catch_clause" => &[Role::Catch],
    "throw_statement" => &[Role::Throw, Role::Statement],
    "block" => &[Role::Block],
    "expression_statement" => &[Role::Statement],
    "binary_expression" => &[Role::Binary, Role::Expression],
    "prefix_unary_expression" => &[Role::Unary, Role::Expression],
    "postfix_unary_expression" => &[Role::Unary, Role::Expression],
    "member_access_expression" => &[Role::Member, Role::Expression],
    "lambda_expression" => &[Role::Lambda, Role::Expression],
    "break_statement" => &[Role::Break, Role::Statement],
    "continue_statement" => &[Role::Continue, Role::Statement],
};
