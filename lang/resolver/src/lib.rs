mod ctx;
mod resolve;
mod result;
mod symbol_table;

pub use ctx::*;
pub use resolve::Resolve;
pub use result::*;
pub use symbol_table::*;

use minnow_ast::Module;

/// Runs name resolution over a whole program.
///
/// Identifier nodes are annotated in place: each use either ends up bound to
/// the symbol of its declaration or stays unbound. The returned resolution
/// carries the global scope, which owns the top-level symbols, and the
/// ordered diagnostics; any diagnostic means the program is rejected.
///
/// The only error this function returns signals a bug in the resolver
/// itself. Problems with the analyzed program never abort the pass.
pub fn resolve_module(module: &Module) -> ResolveResult<Resolution> {
    let mut ctx = Ctx::empty();
    module.decls.resolve(&mut ctx)?;
    ctx.finish()
}

#[cfg(test)]
mod resolve_module_tests {
    use minnow_ast::*;
    use minnow_miette_util::codespan::Span;

    use super::*;

    fn ident(id: &str) -> Ident {
        Ident::from_string(id)
    }

    fn int() -> Typ {
        Typ::Int { span: Span::default() }
    }

    fn bool_typ() -> Typ {
        Typ::Bool { span: Span::default() }
    }

    fn void() -> Typ {
        Typ::Void { span: Span::default() }
    }

    fn struct_typ(name: &str) -> Typ {
        Typ::Struct { span: Span::default(), name: ident(name) }
    }

    fn var_decl(typ: Typ, name: &str) -> VarDecl {
        VarDecl { span: Span::default(), typ, name: ident(name) }
    }

    fn struct_decl(name: &str, fields: Vec<VarDecl>) -> Decl {
        Decl::Struct(StructDecl { span: Span::default(), name: ident(name), fields })
    }

    fn fn_decl(
        ret_typ: Typ,
        name: &str,
        params: Vec<(Typ, &str)>,
        decls: Vec<Decl>,
        stmts: Vec<Stmt>,
    ) -> Decl {
        Decl::Fn(FnDecl {
            span: Span::default(),
            ret_typ,
            name: ident(name),
            params: params
                .into_iter()
                .map(|(typ, name)| Param { span: Span::default(), typ, name: ident(name) })
                .collect(),
            body: FnBody { decls, stmts },
        })
    }

    fn var(name: &str) -> Exp {
        Exp::Var(Var { name: ident(name) })
    }

    fn int_lit(value: i64) -> Exp {
        Exp::IntLit(IntLit { span: Span::default(), value })
    }

    fn dot(base: Exp, field: &str) -> Exp {
        Exp::DotAccess(DotAccess {
            span: Span::default(),
            base: Box::new(base),
            field: ident(field),
        })
    }

    fn assign_stmt(lhs: Exp, rhs: Exp) -> Stmt {
        Stmt::Assign(AssignStmt {
            assign: Assign { span: Span::default(), lhs: Box::new(lhs), rhs: Box::new(rhs) },
        })
    }

    fn call_stmt(name: &str) -> Stmt {
        Stmt::Call(CallStmt {
            call: Call { span: Span::default(), name: ident(name), args: vec![] },
        })
    }

    fn point() -> Decl {
        struct_decl("Point", vec![var_decl(int(), "x"), var_decl(int(), "y")])
    }

    #[test]
    fn struct_var_and_field_access() {
        let module = Module {
            decls: vec![
                point(),
                Decl::Var(var_decl(struct_typ("Point"), "p")),
                fn_decl(void(), "main", vec![], vec![], vec![assign_stmt(
                    dot(var("p"), "x"),
                    int_lit(3),
                )]),
            ],
        };
        let res = resolve_module(&module).unwrap();
        assert!(res.is_valid());
        // The global scope keeps the struct's field table alive, so the
        // annotations on the tree stay resolvable.
        let Decl::Fn(main) = &module.decls[2] else { unreachable!() };
        let Stmt::Assign(assign) = &main.body.stmts[0] else { unreachable!() };
        let Exp::DotAccess(access) = &*assign.assign.lhs else { unreachable!() };
        {
            let field_sym = access.field.binding().unwrap();
            assert!(matches!(&*field_sym, Symbol::Var(VarSymbol { typ: VarType::Int })));
        }
        // Once the resolution (and with it the global scope) is gone, no
        // strong reference to the field symbol remains.
        drop(res);
        assert!(access.field.binding().is_none());
    }

    #[test]
    fn dot_access_of_int_variable() {
        let module = Module {
            decls: vec![
                struct_decl("Point", vec![var_decl(int(), "x")]),
                Decl::Var(var_decl(int(), "z")),
                fn_decl(void(), "main", vec![], vec![], vec![assign_stmt(
                    dot(var("z"), "x"),
                    int_lit(1),
                )]),
            ],
        };
        let res = resolve_module(&module).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::DotAccessOfNonStruct { .. }));
    }

    #[test]
    fn duplicate_declaration_keeps_first() {
        let module = Module {
            decls: vec![Decl::Var(var_decl(int(), "a")), Decl::Var(var_decl(bool_typ(), "a"))],
        };
        let res = resolve_module(&module).unwrap();
        assert_eq!(res.diagnostics.len(), 1);
        assert!(matches!(
            res.diagnostics.iter().next().unwrap(),
            ResolveError::MultiplyDeclared { name, .. } if name.id == "a"
        ));
        let sym = res.globals.lookup("a").unwrap();
        assert!(matches!(&**sym, Symbol::Var(VarSymbol { typ: VarType::Int })));
    }

    #[test]
    fn void_variable_is_rejected() {
        let module = Module { decls: vec![Decl::Var(var_decl(void(), "v"))] };
        let res = resolve_module(&module).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::DeclaredVoid { name, .. } if name.id == "v"));
    }

    #[test]
    fn undeclared_callee() {
        let module = Module {
            decls: vec![
                fn_decl(int(), "f", vec![(int(), "a")], vec![], vec![Stmt::Return(ReturnStmt {
                    span: Span::default(),
                    exp: Some(var("a")),
                })]),
                fn_decl(void(), "main", vec![], vec![], vec![call_stmt("f"), call_stmt("g")]),
            ],
        };
        let res = resolve_module(&module).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::UndeclaredIdent { name, .. } if name.id == "g"));
    }

    #[test]
    fn undeclared_struct_type_in_field() {
        let module = Module {
            decls: vec![struct_decl("A", vec![var_decl(struct_typ("B"), "bad")])],
        };
        let res = resolve_module(&module).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::UndeclaredIdent { name, .. } if name.id == "B"));
    }

    #[test]
    fn non_struct_type_name() {
        let module = Module {
            decls: vec![
                Decl::Var(var_decl(int(), "T")),
                Decl::Var(var_decl(struct_typ("T"), "x")),
            ],
        };
        let res = resolve_module(&module).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::InvalidStructType { name, .. } if name.id == "T"));
    }

    fn chain_module(inner_field: Typ) -> Module {
        Module {
            decls: vec![
                struct_decl("U", vec![var_decl(int(), "y")]),
                struct_decl("T", vec![var_decl(inner_field, "x")]),
                Decl::Var(var_decl(struct_typ("T"), "p")),
                fn_decl(void(), "main", vec![], vec![], vec![assign_stmt(
                    dot(dot(var("p"), "x"), "y"),
                    int_lit(1),
                )]),
            ],
        }
    }

    #[test]
    fn multi_hop_chain_resolves() {
        let res = resolve_module(&chain_module(struct_typ("U"))).unwrap();
        assert!(res.is_valid());
    }

    #[test]
    fn broken_chain_link_reports_once() {
        // `x` is an int, so `p.x.y` breaks at the second hop.
        let res = resolve_module(&chain_module(int())).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::DotAccessOfNonStruct { .. }));
    }

    #[test]
    fn unknown_field_reports_once() {
        let module = Module {
            decls: vec![
                point(),
                Decl::Var(var_decl(struct_typ("Point"), "p")),
                fn_decl(void(), "main", vec![], vec![], vec![assign_stmt(
                    dot(var("p"), "z"),
                    int_lit(1),
                )]),
            ],
        };
        let res = resolve_module(&module).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::InvalidStructField { name, .. } if name.id == "z"));
    }

    #[test]
    fn struct_redeclaration_is_rejected() {
        let module = Module {
            decls: vec![point(), struct_decl("Point", vec![var_decl(bool_typ(), "flag")])],
        };
        let res = resolve_module(&module).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::MultiplyDeclared { name, .. } if name.id == "Point"));
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let module = Module {
            decls: vec![struct_decl("P", vec![var_decl(int(), "x"), var_decl(int(), "x")])],
        };
        let res = resolve_module(&module).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::MultiplyDeclared { name, .. } if name.id == "x"));
    }

    #[test]
    fn shadowing_in_nested_scope_is_allowed() {
        let module = Module {
            decls: vec![
                Decl::Var(var_decl(int(), "x")),
                fn_decl(void(), "f", vec![], vec![Decl::Var(var_decl(bool_typ(), "x"))], vec![]),
            ],
        };
        let res = resolve_module(&module).unwrap();
        assert!(res.is_valid());
    }

    #[test]
    fn then_branch_locals_invisible_in_else() {
        let stmt = Stmt::IfElse(IfElseStmt {
            span: Span::default(),
            cond: Exp::BoolLit(BoolLit { span: Span::default(), value: true }),
            then_decls: vec![Decl::Var(var_decl(int(), "t"))],
            then_stmts: vec![],
            else_decls: vec![],
            else_stmts: vec![Stmt::PostInc(PostIncStmt { span: Span::default(), exp: var("t") })],
        });
        let module = Module { decls: vec![fn_decl(void(), "main", vec![], vec![], vec![stmt])] };
        let res = resolve_module(&module).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::UndeclaredIdent { name, .. } if name.id == "t"));
    }

    #[test]
    fn condition_resolves_before_block_locals() {
        let stmt = Stmt::While(WhileStmt {
            span: Span::default(),
            cond: var("b"),
            decls: vec![Decl::Var(var_decl(bool_typ(), "b"))],
            stmts: vec![],
        });
        let module = Module { decls: vec![fn_decl(void(), "main", vec![], vec![], vec![stmt])] };
        let res = resolve_module(&module).unwrap();
        let diags = res.diagnostics.into_vec();
        assert_eq!(diags.len(), 1);
        assert!(matches!(&diags[0], ResolveError::UndeclaredIdent { name, .. } if name.id == "b"));
    }

    #[test]
    fn erroneous_input_keeps_scope_depth_balanced() {
        let mut ctx = Ctx::empty();
        let decl = fn_decl(void(), "main", vec![(void(), "bad")], vec![], vec![Stmt::If(
            IfStmt {
                span: Span::default(),
                cond: var("nope"),
                decls: vec![Decl::Var(var_decl(int(), "i"))],
                stmts: vec![call_stmt("nope2")],
            },
        )]);
        decl.resolve(&mut ctx).unwrap();
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.diagnostics.len(), 3);
    }
}
