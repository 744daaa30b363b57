//! Primary expressions: literals, names, collections, functions, `if`,
//! `for`, `import` and parenthesised expressions.

use pars_ir::{DictEntry, DictKey, ExprId, ExprKind, ImportKind, ImportPath, Param};
use pars_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let span = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Int(n) => ExprKind::Int(n),
            TokenKind::Float(bits) => ExprKind::Float(bits),
            TokenKind::Str(name) => ExprKind::Str(name),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Ident(name) => ExprKind::Ident(name),
            TokenKind::LParen => {
                self.advance();
                self.skip_newlines();
                let inner = self.parse_expr()?;
                self.skip_newlines();
                self.expect(TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => return self.parse_array(),
            TokenKind::LBrace => return self.parse_dict(),
            TokenKind::Fn => return self.parse_function(),
            TokenKind::If => return self.parse_if(),
            TokenKind::For => return self.parse_for(),
            TokenKind::Import => {
                self.advance();
                let path = self.parse_module_path()?;
                return Ok(self.alloc(ExprKind::Import(path), span.merge(path.span)));
            }
            found => return Err(ParseError::ExpectedExpression { found, span }),
        };
        self.advance();
        Ok(self.alloc(kind, span))
    }

    fn parse_array(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::LBracket)?;
        let items = self.parse_comma_list(TokenKind::RBracket)?;
        let range = self.arena.alloc_expr_list(items);
        Ok(self.alloc(ExprKind::Array(range), start.merge(self.previous_span())))
    }

    /// `{key: v, "key": v, [expr]: v, ...spread}`
    fn parse_dict(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::LBrace)?;
        let mut entries = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RBrace) {
                break;
            }

            let entry_start = self.current_span();
            let key = match self.current_kind() {
                TokenKind::Ellipsis => {
                    self.advance();
                    DictKey::Spread
                }
                TokenKind::Ident(name) | TokenKind::Str(name) => {
                    self.advance();
                    self.expect(TokenKind::Colon)?;
                    DictKey::Named(name)
                }
                TokenKind::LBracket => {
                    self.advance();
                    let key = self.parse_expr()?;
                    self.expect(TokenKind::RBracket)?;
                    self.expect(TokenKind::Colon)?;
                    DictKey::Computed(key)
                }
                _ => return Err(self.unexpected("dictionary key")),
            };
            self.skip_newlines();
            let value = self.parse_expr()?;
            entries.push(DictEntry {
                key,
                value,
                span: entry_start.merge(self.previous_span()),
            });

            self.skip_newlines();
            if !self.eat(TokenKind::Comma) {
                self.skip_newlines();
                self.expect(TokenKind::RBrace)?;
                break;
            }
        }
        let range = self.arena.alloc_dict_entries(entries);
        Ok(self.alloc(ExprKind::Dict(range), start.merge(self.previous_span())))
    }

    /// `fn(a, {b}, [c]) { body }` (also spelled `function`). Parameters
    /// take the same patterns as `let`.
    fn parse_function(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::Fn)?;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RParen) {
                break;
            }
            let param_start = self.current_span();
            let target = self.parse_let_target()?;
            params.push(Param {
                target,
                span: param_start.merge(self.previous_span()),
            });
            self.skip_newlines();
            if !self.eat(TokenKind::Comma) {
                self.skip_newlines();
                self.expect(TokenKind::RParen)?;
                break;
            }
        }
        let params = self.arena.alloc_params(params);
        let body = self.parse_block_expr()?;
        Ok(self.alloc(
            ExprKind::Function { params, body },
            start.merge(self.previous_span()),
        ))
    }

    /// `if (cond) then else otherwise`; branches are blocks or expressions.
    /// `else` may start on the line after the then branch.
    fn parse_if(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::If)?;
        let cond = if self.check(TokenKind::LParen) {
            self.advance();
            self.skip_newlines();
            let cond = self.parse_expr()?;
            self.skip_newlines();
            self.expect(TokenKind::RParen)?;
            cond
        } else {
            self.parse_expr()?
        };
        let then_branch = self.parse_branch()?;

        let else_branch = if self.cursor.next_significant_kind() == TokenKind::Else {
            self.skip_newlines();
            self.advance();
            Some(self.parse_branch()?)
        } else {
            None
        };

        Ok(self.alloc(
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            },
            start.merge(self.previous_span()),
        ))
    }

    /// `for (x in e) body` / `for (k, v in e) body`, parentheses optional.
    fn parse_for(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::For)?;
        let parenthesised = self.eat(TokenKind::LParen);

        let (first, _) = self.expect_ident()?;
        let (key, value) = if self.eat(TokenKind::Comma) {
            (Some(first), self.expect_ident()?.0)
        } else {
            (None, first)
        };
        self.expect(TokenKind::In)?;
        let iterable = self.parse_expr()?;
        if parenthesised {
            self.expect(TokenKind::RParen)?;
        }
        let body = self.parse_branch()?;

        Ok(self.alloc(
            ExprKind::For {
                key,
                value,
                iterable,
                body,
            },
            start.merge(self.previous_span()),
        ))
    }

    fn parse_branch(&mut self) -> Result<ExprId, ParseError> {
        if self.check(TokenKind::LBrace) {
            self.parse_block_expr()
        } else {
            self.parse_expr()
        }
    }

    /// `{ statements }` as a block.
    pub(crate) fn parse_block_expr(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::LBrace)?;
        let stmts = self.parse_statements(Some(TokenKind::RBrace));
        self.expect(TokenKind::RBrace)?;
        let range = self.arena.alloc_stmts(stmts);
        Ok(self.alloc(ExprKind::Block(range), start.merge(self.previous_span())))
    }

    /// `@std/name`, `@./file.pars` or `@../file.pars`.
    pub(crate) fn parse_module_path(&mut self) -> Result<ImportPath, ParseError> {
        let TokenKind::ModulePath(name) = self.current_kind() else {
            return Err(self.unexpected("module path"));
        };
        let span = self.current_span();
        self.advance();

        let text = self.interner.lookup(name);
        if let Some(module) = text.strip_prefix("std/") {
            if !module.is_empty() && !module.contains('/') {
                return Ok(ImportPath {
                    kind: ImportKind::Std,
                    path: self.interner.intern(module),
                    span,
                });
            }
        } else if text.starts_with("./") || text.starts_with("../") {
            return Ok(ImportPath {
                kind: ImportKind::Local,
                path: name,
                span,
            });
        }
        Err(ParseError::InvalidModulePath {
            path: text.to_string(),
            span,
        })
    }
}
