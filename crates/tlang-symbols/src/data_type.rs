/// The eight symbol kinds from `spec.md` §3's type lattice, plus the two
/// structural kinds (`Array`, `TypedefName`) and the two bookkeeping kinds
/// (`Scope`, `Undefined`) the original `DATA_TYPE` enum also carries.
///
/// `Long` and `Int` share a rank and storage width; `Long` survives only so
/// a declaration written `long x;` can be echoed back with its own name in
/// diagnostics and the tree dump (`spec.md`'s ambiguity note (a)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Short,
    Int,
    Long,
    LongLong,
    Array,
    TypedefName,
    Scope,
    Undefined,
}

impl DataType {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DataType::Short | DataType::Int | DataType::Long | DataType::LongLong
        )
    }

    /// `max(left, right)` under `SHORT < INT = LONG < LONGLONG`, cascading
    /// `LongLong` first, then `Long`, then `Int`, matching the tie-break
    /// order `original_source/tree.cpp`'s `GetMaxType` uses (checking the
    /// `long`-declared tag ahead of plain `int` even though the two are
    /// rank-equal and storage-identical).
    pub fn max_type(a: DataType, b: DataType) -> DataType {
        debug_assert!(a.is_integer() && b.is_integer());
        if a == DataType::LongLong || b == DataType::LongLong {
            DataType::LongLong
        } else if a == DataType::Long || b == DataType::Long {
            DataType::Long
        } else if a == DataType::Int || b == DataType::Int {
            DataType::Int
        } else {
            DataType::Short
        }
    }

    /// Every integer width can be cast to every other; only non-integer
    /// kinds (arrays, typedef names) are rejected, which the grammar never
    /// feeds into arithmetic position to begin with.
    pub fn can_implicit_cast(from: DataType, to: DataType) -> bool {
        from.is_integer() && to.is_integer()
    }

    /// The name used in diagnostics and the tree dump.
    pub fn display_name(self) -> &'static str {
        match self {
            DataType::Short => "short",
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::LongLong => "longlong",
            DataType::Array => "массив",
            DataType::TypedefName => "метка типа",
            DataType::Scope => "область видимости",
            DataType::Undefined => "неопределённый",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_type_rank() {
        assert_eq!(DataType::max_type(DataType::Short, DataType::Int), DataType::Int);
        assert_eq!(DataType::max_type(DataType::Int, DataType::LongLong), DataType::LongLong);
        assert_eq!(DataType::max_type(DataType::Short, DataType::Short), DataType::Short);
    }

    #[test]
    fn long_wins_tie_break_over_int() {
        assert_eq!(DataType::max_type(DataType::Long, DataType::Int), DataType::Long);
        assert_eq!(DataType::max_type(DataType::Int, DataType::Long), DataType::Long);
    }
}
