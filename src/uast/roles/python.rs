//! Python (tree-sitter-python node kinds).

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "module" => &[Role::File],
    "identifier" => &[Role::Identifier],
    "string" => &[Role::String, Role::Literal],
    "integer" => &[Role::Number, Role::Literal],
    "float" => &[Role::Number, Role::Literal],
    "true" => &[Role::Boolean, Role::Literal],
    "false" => &[Role::Boolean, Role::Literal],
    "none" => &[Role::Null, Role::Literal],
    "comment" => &[Role::Comment],
    "function_definition" => &[Role::FunctionDeclaration, Role::Statement],
    "parameters" => &[Role::Parameter],
    "default_parameter" => &[Role::Parameter],
    "typed_parameter" => &[Role::Parameter],
    "typed_default_parameter" => &[Role::Parameter],
    "argument_list" => &[Role::Argument],
    "keyword_argument" => &[Role::Argument],
    "call" => &[Role::Call, Role::Expression],
    "class_definition" => &[Role::TypeDeclaration, Role::Statement],
    "assignment" => &[Role::Assignment],
    "augmented_assignment" => &[Role::Assignment, Role::Operator],
    "import_statement" => &[Role::Import, Role::Statement],
    "import_from_statement" => &[Role::Import, Role::Statement],
    "return_statement" => &[Role::Return, Role::Statement],
    "if_statement" => &[Role::If, Role::Statement],
    "elif_clause" => &[Role::If],
    "else_clause" => &[Role::If],
    "conditional_expression" => &[Role::If, Role::Expression],
    "for_statement" => &[Role::Loop, Role::Statement],
    "while_statement" => &[Role::Loop, Role::Statement],
    "try_statement" => &[Role::Try, Role::Statement],
    "except_clause" => &[Role::Catch],
    "raise_statement" => &[Role::Throw, Role::Statement],
    "block" => &[Role::Block],
    "expression_statement" => &[Role::Statement],
    "binary_operator" => &[Role::Binary, Role::Expression],
    "boolean_operator" => &[Role::Binary, Role::Expression],
    "comparison_operator" => &[Role::Binary, Role::Expression],
    "unary_operator" => &[Role::Unary, Role::Expression],
    "not_operator" => &[Role::Unary, Role::Expression],
    "attribute" => &[Role::Member, Role::Expression],
    "lambda" => &[Role::Lambda, Role::Expression],
    "break_statement" => &[Role::Break, Role::Statement],
    "continue_statement" => &[Role::Continue, Role::Statement],
    "type" => &[Role::Type],
    "print_statement" => &[Role::Call, Role::Statement],
};
