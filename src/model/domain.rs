/// The domain of an integer variable.
///
/// Domains are declared with the variable and never change afterwards.
/// They are either a contiguous interval or an explicit set of values;
/// explicit sets are kept sorted and deduplicated by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Domain {
    /// A contiguous interval, both bounds included.
    Interval(i64, i64),
    /// An explicit, sorted, duplicate-free set of values.
    Values(Vec<i64>),
}

impl Domain {
    /// Builds an explicit-set domain from arbitrary values.
    ///
    /// The values are sorted and deduplicated.
    ///
    /// # Example
    ///
    /// ```
    /// # use zinco::model::Domain;
    /// assert_eq!(Domain::values(vec![3, 1, 1]), Domain::values(vec![1, 3]));
    /// ```
    pub fn values(mut values: Vec<i64>) -> Self {
        values.sort_unstable();
        values.dedup();
        Domain::Values(values)
    }

    /// Returns `true` iff the domain is exactly the pair of values 0 and 1.
    ///
    /// This is the admissibility condition for the integer side of a
    /// boolean-to-integer coercion.
    pub fn is_zero_one(&self) -> bool {
        match self {
            Domain::Interval(min, max) => *min == 0 && *max == 1,
            Domain::Values(values) => values.as_slice() == [0, 1],
        }
    }

    /// Returns the lowest value of the domain.
    ///
    /// # Panics
    ///
    /// Panics if the domain is an empty explicit set.
    pub fn min(&self) -> i64 {
        match self {
            Domain::Interval(min, _) => *min,
            Domain::Values(values) => values[0],
        }
    }

    /// Returns the highest value of the domain.
    ///
    /// # Panics
    ///
    /// Panics if the domain is an empty explicit set.
    pub fn max(&self) -> i64 {
        match self {
            Domain::Interval(_, max) => *max,
            Domain::Values(values) => *values.last().unwrap(),
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Interval(min, max) => write!(f, "{}..{}", min, max),
            Domain::Values(values) => {
                write!(f, "{{")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "}}")
            }
        }
    }
}
