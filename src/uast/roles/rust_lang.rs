//! Rust (tree-sitter-rust node kinds).

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "source_file" => &[Role::File],
    "use_declaration" => &[Role::Import],
    "mod_item" => &[Role::Package],
    "identifier" => &[Role::Identifier],
    "field_identifier" => &[Role::Identifier],
    "type_identifier" => &[Role::Type],
    "primitive_type" => &[Role::Type],
    "string_literal" => &[Role::String, Role::Literal],
    "raw_string_literal" => &[Role::String, Role::Literal],
    "char_literal" => &[Role::String, Role::Literal],
    "integer_literal" => &[Role::Number, Role::Literal],
    "float_literal" => &[Role::Number, Role::Literal],
    "boolean_literal" => &[Role::Boolean, Role::Literal],
    "line_comment" => &[Role::Comment],
    "block_comment" => &[Role::Comment],
    "function_item" => &[Role::FunctionDeclaration],
    "parameters" => &[Role::Parameter],
    "parameter" => &[Role::Parameter],
    "arguments" => &[Role::Argument],
    "call_expression" => &[Role::Call, Role::Expression],
    "macro_invocation" => &[Role::Call, Role::Expression],
    "struct_item" => &[Role::TypeDeclaration],
    "enum_item" => &[Role::TypeDeclaration],
    "trait_item" => &[Role::TypeDeclaration],
    "type_item" => &[Role::TypeDeclaration],
    "let_declaration" => &[Role::VariableDeclaration, Role::Statement],
    "const_item" => &[Role::VariableDeclaration],
    "static_item" => &[Role::VariableDeclaration],
    "assignment_expression" => &[Role::Assignment, Role::Expression],
    "compound_assignment_expr" => &[Role::Assignment, Role::Operator, Role::Expression],
    "return_expression" => &[Role::Return, Role::Expression],
    "if_expression" => &[Role::If, Role::Expression],
    "else_clause" => &[Role::If],
    "for_expression" => &[Role::Loop, Role::Expression],
    "while_expression" => &[Role::Loop, Role::Expression],
    "loop_expression" => &[Role::Loop, Role::Expression],
    "match_expression" => &[Role::Switch, Role::Expression],
    "block" => &[Role::Block],
    "expression_statement" => &[Role::Statement],
    "binary_expression" => &[Role::Binary, Role::Expression],
    "unary_expression" => &[Role::Unary, Role::Expression],
    "field_expression" => &[Role::Member, Role::Expression],
    "index_expression" => &[Role::Member, Role::Expression],
    "closure_expression" => &[Role::Lambda, Role::Expression],
    "break_expression" => &[Role::Break, Role::Expression],
    "continue_expression" => &[Role::Continue, Role::Expression],
};
