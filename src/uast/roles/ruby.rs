//! Ruby, for drivers emitting tree-sitter-ruby node kinds.

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "program" => &[Role::File],
    "identifier" => &[Role::Identifier],
    "constant" => &[Role::Identifier],
    "string" => &[Role::String, Role::Literal],
    "integer" => &[Role::Number, Role::Literal],
    "float" => &[Role::Number, Role::Literal],
    "true" => &[Role::Boolean, Role::Literal],
    "false" => &[Role::Boolean, Role::Literal],
    "nil" => &[Role::Null, Role::Literal],
    "comment" => &[Role::Comment],
    "method" => &[Role::FunctionDeclaration],
    "singleton_method" => &[Role::FunctionDeclaration],
    "method_parameters" => &[Role::Parameter],
    "argument_list" => &[Role::Argument],
    "call" => &[Role::Call, Role::Expression],
    "class" => &[Role::TypeDeclaration],
    "module" => &[Role::TypeDeclaration],
    "assignment" => &[Role::Assignment],
    "operator_assignment" => &[Role::Assignment, Role::Operator],
    "return" => &[Role::Return, Role::Statement],
    "if" => &[Role::If, Role::Statement],
    "unless" => &[Role::If, Role::Statement],
    "elsif" => &[Role::If],
    "while" => &[Role::Loop, Role::Statement],
    "until" => &[Role::Loop, Role::Statement],
    "for" => &[Role::Loop, Role::Statement],
    "case" => &[Role::Switch, Role::Statement],
    "begin" => &[Role::Try, Role::Statement],
    "rescue" => &[Role::Catch],
    "body_statement" => &[Role::Block],
    "do_block" => &[Role::Block, Role::Lambda],
    "block" => &[Role::Block, Role::Lambda],
    "binary" => &[Role::Binary, Role::Expression],
    "unary" => &[Role::Unary, Role::Expression],
    "lambda" => &[Role::Lambda, Role::Expression],
    "break" => &[Role::Break, Role::Statement],
    "next" => &[Role::Continue, Role::Statement],
};
