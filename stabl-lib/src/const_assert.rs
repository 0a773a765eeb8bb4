#[macro_export]
macro_rules! const_assert {
    ($condition:expr) => {
        const _: () = {
            assert!($condition);
        };
    };
    ($condition:expr, $msg:literal) => {
        const _: () = {
            assert!($condition, $msg);
        };
    };
}
