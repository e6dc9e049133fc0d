//! Go (tree-sitter-go node kinds).

use phf::phf_map;

use super::{Role, RoleTable};

pub static ROLES: RoleTable = phf_map! {
    "source_file" => &[Role::File],
    "package_clause" => &[Role::Package],
    "identifier" => &[Role::Identifier],
    "field_identifier" => &[Role::Identifier],
    "package_identifier" => &[Role::Identifier],
    "type_identifier" => &[Role::Type],
    "interpreted_string_literal" => &[Role::String, Role::Literal],
    "raw_string_literal" => &[Role::String, Role::Literal],
    "int_literal" => &[Role::Number, Role::Literal],
    "float_literal" => &[Role::Number, Role::Literal],
    "true" => &[Role::Boolean, Role::Literal],
    "false" => &[Role::Boolean, Role::Literal],
    "nil" => &[Role::Null, Role::Literal],
    "comment" => &[Role::Comment],
    "function_declaration" => &[Role::FunctionDeclaration, Role::Statement],
    "method_declaration" => &[Role::FunctionDeclaration, Role::Statement],
    "parameter_list" => &[Role::Parameter],
    "parameter_declaration" => &[Role::Parameter],
    "argument_list" => &[Role::Argument],
    "call_expression" => &[Role::Call, Role::Expression],
    "type_declaration" => &[Role::TypeDeclaration, Role::Statement],
    "var_declaration" => &[Role::VariableDeclaration, Role::Statement],
    "const_declaration" => &[Role::VariableDeclaration, Role::Statement],
    "short_var_declaration" => &[Role::VariableDeclaration, Role::Assignment, Role::Statement],
    "assignment_statement" => &[Role::Assignment, Role::Statement],
    "import_declaration" => &[Role::Import, Role::Statement],
    "import_spec" => &[Role::Import],
    "return_statement" => &[Role::Return, Role::Statement],
    "if_statement" => &[Role::If, Role::Statement],
    "for_statement" => &[Role::Loop, Role::Statement],
    "expression_switch_statement" => &[Role::Switch, Role::Statement],
    "type_switch_statement" => &[Role::Switch, Role::Statement],
    "block" => &[Role::Block],
    "expression_statement" => &[Role::Statement],
    "binary_expression" => &[Role::Binary, Role::Expression],
    "unary_expression" => &[Role::Unary, Role::Expression],
    "selector_expression" => &[Role::Member, Role::Expression],
    "index_expression" => &[Role::Member, Role::Expression],
    "func_literal" => &[Role::Lambda, Role::Expression],
    "break_statement" => &[Role::Break, Role::Statement],
    "continue_statement" => &[Role::Continue, Role::Statement],
};
