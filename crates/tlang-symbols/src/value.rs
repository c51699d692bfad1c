use crate::data_type::DataType;

/// A runtime value at one of the three storage widths the four-wide type
/// lattice collapses to (`Long` shares `Int`'s `i32` storage).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    I16(i16),
    I32(i32),
    I64(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Value {
    pub fn as_i64(self) -> i64 {
        match self {
            Value::I16(v) => v as i64,
            Value::I32(v) => v as i64,
            Value::I64(v) => v,
        }
    }

    /// The smallest width among {SHORT, INT, LONGLONG} whose range contains
    /// `raw`, per `spec.md` §4.D. `LONG` never arises from a literal.
    pub fn from_literal(raw: i64) -> (Value, DataType) {
        if (i16::MIN as i64..=i16::MAX as i64).contains(&raw) {
            (Value::I16(raw as i16), DataType::Short)
        } else if (i32::MIN as i64..=i32::MAX as i64).contains(&raw) {
            (Value::I32(raw as i32), DataType::Int)
        } else {
            (Value::I64(raw), DataType::LongLong)
        }
    }

    /// Two's-complement truncating cast to `ty`'s storage width. The bool
    /// reports whether the source magnitude did not fit the destination
    /// range — the signal a caller uses to decide whether to raise the
    /// *truncation* warning (always shown) versus the *conversion* warning
    /// (debug only, raised by the caller when widths differ but this bit
    /// is false).
    pub fn cast_to(self, ty: DataType) -> (Value, bool) {
        let src = self.as_i64();
        match ty {
            DataType::Short => {
                let truncated = !(i16::MIN as i64..=i16::MAX as i64).contains(&src);
                (Value::I16(src as i16), truncated)
            }
            DataType::Int | DataType::Long => {
                let truncated = !(i32::MIN as i64..=i32::MAX as i64).contains(&src);
                (Value::I32(src as i32), truncated)
            }
            DataType::LongLong => (Value::I64(src), false),
            other => unreachable!("cast_to called with non-integer width {other:?}"),
        }
    }

    /// The storage width this value already occupies, expressed as the
    /// `DataType` variant with matching rank (`I32` maps to `Int`, never
    /// `Long` — the two are indistinguishable once a value is computed).
    pub fn width(self) -> DataType {
        match self {
            Value::I16(_) => DataType::Short,
            Value::I32(_) => DataType::Int,
            Value::I64(_) => DataType::LongLong,
        }
    }

    /// Arithmetic at the chosen (already-promoted) width. Overflow wraps,
    /// matching `spec.md`'s "implementation-defined overflow ... no
    /// overflow trap".
    pub fn arith(op: ArithOp, a: Value, b: Value, ty: DataType) -> Value {
        let (a, _) = a.cast_to(ty);
        let (b, _) = b.cast_to(ty);
        match (a, b) {
            (Value::I16(x), Value::I16(y)) => Value::I16(apply16(op, x, y)),
            (Value::I32(x), Value::I32(y)) => Value::I32(apply32(op, x, y)),
            (Value::I64(x), Value::I64(y)) => Value::I64(apply64(op, x, y)),
            _ => unreachable!("cast_to must produce matching widths"),
        }
    }

    /// `/` or `%`, at the chosen width. `None` signals a zero divisor; the
    /// caller (the evaluator) turns that into an interpretation-time
    /// diagnostic rather than letting Rust's own division panic fire.
    pub fn div(a: Value, b: Value, ty: DataType) -> Option<Value> {
        let (a, _) = a.cast_to(ty);
        let (b, _) = b.cast_to(ty);
        match (a, b) {
            (Value::I16(_), Value::I16(0)) => None,
            (Value::I32(_), Value::I32(0)) => None,
            (Value::I64(_), Value::I64(0)) => None,
            (Value::I16(x), Value::I16(y)) => Some(Value::I16(x.wrapping_div(y))),
            (Value::I32(x), Value::I32(y)) => Some(Value::I32(x.wrapping_div(y))),
            (Value::I64(x), Value::I64(y)) => Some(Value::I64(x.wrapping_div(y))),
            _ => unreachable!(),
        }
    }

    pub fn rem(a: Value, b: Value, ty: DataType) -> Option<Value> {
        let (a, _) = a.cast_to(ty);
        let (b, _) = b.cast_to(ty);
        match (a, b) {
            (Value::I16(_), Value::I16(0)) => None,
            (Value::I32(_), Value::I32(0)) => None,
            (Value::I64(_), Value::I64(0)) => None,
            (Value::I16(x), Value::I16(y)) => Some(Value::I16(x.wrapping_rem(y))),
            (Value::I32(x), Value::I32(y)) => Some(Value::I32(x.wrapping_rem(y))),
            (Value::I64(x), Value::I64(y)) => Some(Value::I64(x.wrapping_rem(y))),
            _ => unreachable!(),
        }
    }

    /// Comparisons always run at the operands' promoted width, but their
    /// result is `INT` (1 = true, 0 = false) regardless of that width.
    pub fn compare(op: CmpOp, a: Value, b: Value, ty: DataType) -> Value {
        let (a, _) = a.cast_to(ty);
        let (b, _) = b.cast_to(ty);
        let result = match (a, b) {
            (Value::I16(x), Value::I16(y)) => eval_cmp(op, x, y),
            (Value::I32(x), Value::I32(y)) => eval_cmp(op, x, y),
            (Value::I64(x), Value::I64(y)) => eval_cmp(op, x, y),
            _ => unreachable!(),
        };
        Value::I32(result as i32)
    }

    pub fn is_truthy(self) -> bool {
        self.as_i64() != 0
    }
}

fn eval_cmp<T: PartialOrd>(op: CmpOp, x: T, y: T) -> bool {
    match op {
        CmpOp::Eq => x == y,
        CmpOp::Neq => x != y,
        CmpOp::Lt => x < y,
        CmpOp::Le => x <= y,
        CmpOp::Gt => x > y,
        CmpOp::Ge => x >= y,
    }
}

fn apply16(op: ArithOp, x: i16, y: i16) -> i16 {
    match op {
        ArithOp::Add => x.wrapping_add(y),
        ArithOp::Sub => x.wrapping_sub(y),
        ArithOp::Mul => x.wrapping_mul(y),
    }
}

fn apply32(op: ArithOp, x: i32, y: i32) -> i32 {
    match op {
        ArithOp::Add => x.wrapping_add(y),
        ArithOp::Sub => x.wrapping_sub(y),
        ArithOp::Mul => x.wrapping_mul(y),
    }
}

fn apply64(op: ArithOp, x: i64, y: i64) -> i64 {
    match op {
        ArithOp::Add => x.wrapping_add(y),
        ArithOp::Sub => x.wrapping_sub(y),
        ArithOp::Mul => x.wrapping_mul(y),
    }
}
