//! This module contains the symbols and keywords of the surface language.
//! These constants are used when we prettyprint source code.

// Symbols
//
//

/// The symbol `,`
pub const COMMA: &str = ",";

/// The symbol `;`
pub const SEMI: &str = ";";

/// The symbol `.`
pub const DOT: &str = ".";

/// The symbol `=`
pub const ASSIGN: &str = "=";

/// The symbol `++`
pub const INC: &str = "++";

/// The symbol `--`
pub const DEC: &str = "--";

/// The symbol `>>` (input redirection)
pub const READ_FROM: &str = ">>";

/// The symbol `<<` (output redirection)
pub const WRITE_TO: &str = "<<";

// Keywords
//
//

/// The keyword `int`
pub const INT: &str = "int";

/// The keyword `bool`
pub const BOOL: &str = "bool";

/// The keyword `void`
pub const VOID: &str = "void";

/// The keyword `struct`
pub const STRUCT: &str = "struct";

/// The keyword `if`
pub const IF: &str = "if";

/// The keyword `else`
pub const ELSE: &str = "else";

/// The keyword `while`
pub const WHILE: &str = "while";

/// The keyword `return`
pub const RETURN: &str = "return";

/// The keyword `cin`
pub const CIN: &str = "cin";

/// The keyword `cout`
pub const COUT: &str = "cout";

/// The literal `true`
pub const TRUE: &str = "true";

/// The literal `false`
pub const FALSE: &str = "false";
