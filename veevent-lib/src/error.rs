/// declares a `Context` trait for the given error type so callers can attach
/// a message to a failed `Result` or an empty `Option`
#[macro_export]
macro_rules! context_trait {
    ($e:path) => {
        pub trait Context<T, E> {
            fn context<C>(self, cxt: C) -> std::result::Result<T, $e>
            where
                C: Into<String>;
        }
    };
}
