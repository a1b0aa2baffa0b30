//! Expression evaluation.
//!
//! Only the subset of the expression language the statements need: variable
//! lookup, attribute and index access, list literals, negation, `range` and
//! `loop.cycle`. Everything else belongs to the full expression layer.

use jinja_ir::Expr;
use jinja_stack::ensure_sufficient_stack;
use jinja_value::{
    type_mismatch, undefined_function, undefined_method, wrong_arg_count, EvalError, EvalResult,
    ListItemAccessor, Value, ValuesList,
};

use crate::loop_names::{CYCLE, INDEX0};
use crate::RenderContext;

/// Evaluate `expr` against the scopes of `context`.
///
/// Unbound variables evaluate to `Empty`.
pub fn evaluate(expr: &Expr, context: &RenderContext) -> EvalResult {
    ensure_sufficient_stack(|| eval_inner(expr, context))
}

fn eval_inner(expr: &Expr, context: &RenderContext) -> EvalResult {
    match expr {
        Expr::Const(value) => Ok(value.clone()),
        Expr::Var(name) => Ok(context.lookup(name).cloned().unwrap_or(Value::Empty)),
        Expr::Attr { object, name } => evaluate(object, context)?.subscript(name),
        Expr::Index { object, index } => {
            let object = evaluate(object, context)?;
            let index = evaluate(index, context)?;
            eval_index(&object, &index)
        }
        Expr::List(items) => {
            let items = eval_args(items, context)?;
            Ok(Value::list(items))
        }
        Expr::Not(operand) => Ok(Value::Bool(!evaluate(operand, context)?.is_truthy())),
        Expr::Call { name, args } => {
            let args = eval_args(args, context)?;
            call_global(name, &args)
        }
        Expr::MethodCall { object, name, args } => {
            let receiver = evaluate(object, context)?;
            let args = eval_args(args, context)?;
            call_method(&receiver, name, &args)
        }
    }
}

fn eval_args(args: &[Expr], context: &RenderContext) -> Result<ValuesList, EvalError> {
    args.iter().map(|arg| evaluate(arg, context)).collect()
}

/// `object[index]`: string keys go through `subscript`, integers index
/// list-shaped values. Anything else is `Empty`.
fn eval_index(object: &Value, index: &Value) -> EvalResult {
    match index {
        Value::Str(key) => object.subscript(key),
        Value::Int(n) if object.is_list() => {
            let items = object.list_accessor();
            let len = items.size();
            Ok(usize::try_from(*n)
                .ok()
                .filter(|&i| i < len)
                .map_or(Value::Empty, |i| items.value_by_index(i)))
        }
        _ => Ok(Value::Empty),
    }
}

fn call_global(name: &str, args: &[Value]) -> EvalResult {
    match name {
        "range" => range(args),
        _ => Err(undefined_function(name)),
    }
}

fn call_method(receiver: &Value, name: &str, args: &[Value]) -> EvalResult {
    if name == CYCLE {
        // Only the loop pseudo-variable carries a position to cycle by.
        if let Ok(Value::Int(index0)) = receiver.subscript(INDEX0) {
            return Ok(cycle(index0, args));
        }
    }
    Err(undefined_method(name, receiver.type_name()))
}

/// `args[index0 mod len]`, or `Empty` without arguments.
fn cycle(index0: i64, args: &[Value]) -> Value {
    let Ok(len) = i64::try_from(args.len()) else {
        return Value::Empty;
    };
    if len == 0 {
        return Value::Empty;
    }
    usize::try_from(index0.rem_euclid(len))
        .ok()
        .and_then(|i| args.get(i))
        .cloned()
        .unwrap_or(Value::Empty)
}

/// `range(stop)`, `range(start, stop)` or `range(start, stop, step)`.
fn range(args: &[Value]) -> EvalResult {
    let ints = args
        .iter()
        .map(|arg| {
            arg.as_int()
                .ok_or_else(|| type_mismatch("int", arg.type_name()))
        })
        .collect::<Result<Vec<i64>, EvalError>>()?;

    let (start, stop, step) = match ints.as_slice() {
        [stop] => (0, *stop, 1),
        [start, stop] => (*start, *stop, 1),
        [start, stop, step] => (*start, *stop, *step),
        _ => return Err(wrong_arg_count("range", 1, 3, args.len())),
    };
    if step == 0 {
        return Err(EvalError::new("range() step must not be zero"));
    }

    let len = range_len(start, stop, step)?;
    Ok(Value::generic_list(RangeAccessor { start, step, len }))
}

/// Number of elements of `range(start, stop, step)`, `step != 0`.
fn range_len(start: i64, stop: i64, step: i64) -> Result<usize, EvalError> {
    let (start, stop) = (i128::from(start), i128::from(stop));
    let span = if step > 0 { stop - start } else { start - stop };
    if span <= 0 {
        return Ok(0);
    }
    let len = span.unsigned_abs().div_ceil(u128::from(step.unsigned_abs()));
    usize::try_from(len)
        .map_err(|_| EvalError::new(format!("range() of {len} elements is too large")))
}

/// Integer sequence computed on access.
struct RangeAccessor {
    start: i64,
    step: i64,
    len: usize,
}

impl ListItemAccessor for RangeAccessor {
    fn size(&self) -> usize {
        self.len
    }

    fn value_by_index(&self, index: usize) -> Value {
        if index >= self.len {
            return Value::Empty;
        }
        let Ok(index) = i128::try_from(index) else {
            return Value::Empty;
        };
        let n = i128::from(self.start) + i128::from(self.step) * index;
        i64::try_from(n).map_or(Value::Empty, Value::int)
    }
}
