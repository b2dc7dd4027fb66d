//! Tree-walking expression evaluator.
//!
//! Evaluation is pure with respect to the context and deterministic: the
//! only state is the registry reference the evaluator is constructed with.
//! Lookup misses, bad indexes and failed coercions all yield `Nil`; the
//! only errors that propagate are the structural filter errors.

use brine_expr::{BinaryOp, Expr, FilterCall, Segment, UnaryOp};
use brine_value::{compare, Number, Value};
use brine_filters::FilterRegistry;

use crate::context::Context;
use crate::errors::EvalError;

/// Upper bound on materialized range length. A range like `(1..n)` with an
/// absurd `n` yields `Nil` instead of an allocation the size of the typo.
const RANGE_MAX: i64 = 1_000_000;

/// Expression evaluator over a shared filter registry.
pub struct Evaluator<'a> {
    registry: &'a FilterRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a FilterRegistry) -> Self {
        Evaluator { registry }
    }

    /// Evaluate an expression over a context.
    pub fn evaluate(&self, expr: &Expr, ctx: &Context) -> Result<Value, EvalError> {
        match expr {
            Expr::Literal(v) => Ok(v.clone()),
            // Standalone sentinels only mean something beside `==`/`!=`.
            Expr::Empty | Expr::Blank => Ok(Value::Nil),
            Expr::Var(segments) => self.resolve_var(segments, ctx),
            Expr::Unary(op, operand) => self.unary(*op, operand, ctx),
            Expr::Binary(op, lhs, rhs) => self.binary(*op, lhs, rhs, ctx),
            Expr::Range(lo, hi) => self.range(lo, hi, ctx),
            Expr::Chain(head, filters) => self.chain(head, filters, ctx),
        }
    }

    fn unary(&self, op: UnaryOp, operand: &Expr, ctx: &Context) -> Result<Value, EvalError> {
        let v = self.evaluate(operand, ctx)?;
        Ok(match op {
            UnaryOp::Not => Value::Bool(!v.is_truthy()),
            UnaryOp::Neg => match v.as_number() {
                Some(Number::Int(n)) => Value::Int(-n),
                Some(Number::Float(f)) => Value::Float(-f),
                None => Value::Nil,
            },
        })
    }

    fn binary(
        &self,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
        ctx: &Context,
    ) -> Result<Value, EvalError> {
        // Logical operators short-circuit and return the operand itself,
        // not a bool: `a or b` is `a` when `a` is truthy.
        match op {
            BinaryOp::And => {
                let left = self.evaluate(lhs, ctx)?;
                return if left.is_truthy() {
                    self.evaluate(rhs, ctx)
                } else {
                    Ok(left)
                };
            }
            BinaryOp::Or => {
                let left = self.evaluate(lhs, ctx)?;
                return if left.is_truthy() {
                    Ok(left)
                } else {
                    self.evaluate(rhs, ctx)
                };
            }
            _ => {}
        }

        // `x == empty` / `x == blank` test the predicate, not a value.
        if matches!(op, BinaryOp::Eq | BinaryOp::NotEq) {
            if let Some(result) = self.sentinel_compare(op, lhs, rhs, ctx)? {
                return Ok(result);
            }
        }

        let left = self.evaluate(lhs, ctx)?;
        let right = self.evaluate(rhs, ctx)?;
        let result = match op {
            BinaryOp::Eq => compare::equal(&left, &right),
            BinaryOp::NotEq => !compare::equal(&left, &right),
            BinaryOp::Lt => compare::less(&left, &right),
            BinaryOp::Gt => compare::less(&right, &left),
            BinaryOp::LtEq => compare::less(&left, &right) || compare::equal(&left, &right),
            BinaryOp::GtEq => compare::less(&right, &left) || compare::equal(&left, &right),
            BinaryOp::Contains => contains(&left, &right),
            BinaryOp::And | BinaryOp::Or => unreachable!(),
        };
        Ok(Value::Bool(result))
    }

    fn sentinel_compare(
        &self,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
        ctx: &Context,
    ) -> Result<Option<Value>, EvalError> {
        let (sentinel, other) = match (lhs, rhs) {
            (Expr::Empty | Expr::Blank, other) => (lhs, other),
            (other, Expr::Empty | Expr::Blank) => (rhs, other),
            _ => return Ok(None),
        };
        let v = self.evaluate(other, ctx)?;
        let matched = match sentinel {
            Expr::Empty => v.is_empty(),
            _ => v.is_blank(),
        };
        let result = match op {
            BinaryOp::Eq => matched,
            _ => !matched,
        };
        Ok(Some(Value::Bool(result)))
    }

    fn range(&self, lo: &Expr, hi: &Expr, ctx: &Context) -> Result<Value, EvalError> {
        let lo = self.evaluate(lo, ctx)?;
        let hi = self.evaluate(hi, ctx)?;
        let (Some(Number::Int(lo)), Some(Number::Int(hi))) = (lo.as_number(), hi.as_number())
        else {
            return Ok(Value::Nil);
        };
        if hi < lo {
            return Ok(Value::array(Vec::new()));
        }
        if hi - lo >= RANGE_MAX {
            return Ok(Value::Nil);
        }
        Ok(Value::array((lo..=hi).map(Value::Int).collect()))
    }

    fn chain(
        &self,
        head: &Expr,
        filters: &[FilterCall],
        ctx: &Context,
    ) -> Result<Value, EvalError> {
        let mut value = self.evaluate(head, ctx)?;
        for call in filters {
            let mut args = Vec::with_capacity(call.args.len() + 1);
            args.push(value);
            for arg in &call.args {
                args.push(self.evaluate(arg, ctx)?);
            }
            value = self.registry.apply(&call.name, &args)?;
        }
        Ok(value)
    }

    /// Walk a variable path left to right. The head name resolves through
    /// the scope chain; each further segment indexes into whatever the
    /// previous step produced. Every miss is `Nil`.
    fn resolve_var(&self, segments: &[Segment], ctx: &Context) -> Result<Value, EvalError> {
        let mut iter = segments.iter();
        let mut current = match iter.next() {
            Some(Segment::Name(name)) => ctx.lookup(name),
            _ => return Ok(Value::Nil),
        };
        for segment in iter {
            current = match segment {
                Segment::Name(name) => step(&current, &Value::string(name.clone())),
                Segment::Index(expr) => {
                    let key = self.evaluate(expr, ctx)?;
                    step(&current, &key)
                }
            };
        }
        Ok(current)
    }
}

/// One step of path resolution: map key, array index (negative counts from
/// the end), or opaque property.
fn step(current: &Value, key: &Value) -> Value {
    match current {
        Value::Map(m) => {
            let name = key.render();
            m.get(&name).cloned().unwrap_or(Value::Nil)
        }
        Value::Array(items) => {
            let Some(Number::Int(idx)) = key.as_number() else {
                return Value::Nil;
            };
            let len = items.len() as i64;
            let idx = if idx < 0 { len + idx } else { idx };
            if idx < 0 || idx >= len {
                Value::Nil
            } else {
                items[idx as usize].clone()
            }
        }
        Value::Opaque(o) => match key {
            Value::Str(name) => o.property(name).unwrap_or(Value::Nil),
            _ => Value::Nil,
        },
        _ => Value::Nil,
    }
}

/// `contains`: substring test for strings (right side rendered), element
/// equality for arrays, false for everything else.
fn contains(left: &Value, right: &Value) -> bool {
    match left {
        Value::Str(s) => s.contains(&right.render()),
        Value::Array(items) => items.iter().any(|el| compare::equal(el, right)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_expr::parse;
    use brine_value::ValueMap;

    fn eval(source: &str, ctx: &Context) -> Value {
        let registry = FilterRegistry::new();
        let evaluator = Evaluator::new(&registry);
        evaluator.evaluate(&parse(source).unwrap(), ctx).unwrap()
    }

    fn ctx() -> Context {
        let mut root = ValueMap::new();
        root.insert("n".into(), Value::Int(3));
        root.insert("name".into(), Value::string("world"));
        root.insert(
            "user".into(),
            Value::map_from([
                ("email", Value::string("a@b.c")),
                (
                    "tags",
                    Value::array(vec![Value::string("x"), Value::string("y")]),
                ),
            ]),
        );
        Context::new(root)
    }

    #[test]
    fn test_lookup_and_paths() {
        let ctx = ctx();
        assert_eq!(eval("name", &ctx), Value::string("world"));
        assert_eq!(eval("user.email", &ctx), Value::string("a@b.c"));
        assert_eq!(eval("user.tags[1]", &ctx), Value::string("y"));
        assert_eq!(eval("user.tags[-1]", &ctx), Value::string("y"));
        assert_eq!(eval("user.tags[9]", &ctx), Value::Nil);
        assert_eq!(eval("user.missing.deeper", &ctx), Value::Nil);
        assert_eq!(eval("undefined", &ctx), Value::Nil);
    }

    #[test]
    fn test_bracket_key_lookup() {
        let ctx = ctx();
        assert_eq!(eval("user['email']", &ctx), Value::string("a@b.c"));
    }

    #[test]
    fn test_logicals_return_operands() {
        let ctx = ctx();
        assert_eq!(eval("name or 'fallback'", &ctx), Value::string("world"));
        assert_eq!(eval("undefined or 'fallback'", &ctx), Value::string("fallback"));
        assert_eq!(eval("name and n", &ctx), Value::Int(3));
        assert_eq!(eval("undefined and n", &ctx), Value::Nil);
    }

    #[test]
    fn test_comparisons() {
        let ctx = ctx();
        assert_eq!(eval("n == 3", &ctx), Value::Bool(true));
        assert_eq!(eval("n != 3", &ctx), Value::Bool(false));
        assert_eq!(eval("n < 4", &ctx), Value::Bool(true));
        assert_eq!(eval("n >= 3", &ctx), Value::Bool(true));
        assert_eq!(eval("n == 3.0", &ctx), Value::Bool(true));
        assert_eq!(eval("'b' > 'a'", &ctx), Value::Bool(true));
    }

    #[test]
    fn test_contains() {
        let ctx = ctx();
        assert_eq!(eval("name contains 'orl'", &ctx), Value::Bool(true));
        assert_eq!(eval("user.tags contains 'x'", &ctx), Value::Bool(true));
        assert_eq!(eval("user.tags contains 'z'", &ctx), Value::Bool(false));
        assert_eq!(eval("n contains 3", &ctx), Value::Bool(false));
    }

    #[test]
    fn test_empty_blank_sentinels() {
        let ctx = ctx();
        assert_eq!(eval("'' == empty", &ctx), Value::Bool(true));
        assert_eq!(eval("undefined == empty", &ctx), Value::Bool(true));
        assert_eq!(eval("name == empty", &ctx), Value::Bool(false));
        assert_eq!(eval("'  ' == blank", &ctx), Value::Bool(true));
        assert_eq!(eval("'  ' == empty", &ctx), Value::Bool(false));
        assert_eq!(eval("name != blank", &ctx), Value::Bool(true));
    }

    #[test]
    fn test_not_and_negation() {
        let ctx = ctx();
        assert_eq!(eval("not undefined", &ctx), Value::Bool(true));
        assert_eq!(eval("not name", &ctx), Value::Bool(false));
        assert_eq!(eval("-n", &ctx), Value::Int(-3));
        assert_eq!(eval("-name", &ctx), Value::Nil);
    }

    #[test]
    fn test_range() {
        let ctx = ctx();
        assert_eq!(
            eval("(1..n)", &ctx),
            Value::array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(eval("(3..1)", &ctx), Value::array(vec![]));
        assert_eq!(eval("('a'..3)", &ctx), Value::Nil);
    }

    #[test]
    fn test_unknown_filter_surfaces() {
        let registry = FilterRegistry::new();
        let evaluator = Evaluator::new(&registry);
        let err = evaluator
            .evaluate(&parse("n | nope").unwrap(), &ctx())
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::UnknownFilter {
                name: "nope".into()
            }
        );
    }
}
