/// Appends `column = ?` to an `UPDATE ... SET` builder when `value` is `Some`,
/// inserting a separator after the first assignment. `sep` tracks whether any
/// assignment has been pushed.
macro_rules! push_update_field {
    ($builder:expr, $sep:ident, $column:literal, $value:expr) => {
        if let Some(value) = $value {
            if $sep {
                $builder.push(", ");
            }
            $builder.push(concat!($column, " = "));
            $builder.push_bind(value);
            $sep = true;
        }
    };
}

pub(crate) use push_update_field;
