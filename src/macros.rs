/// Profiling scopes, compiled away unless the `flamegraph` feature is enabled
macro_rules! flame {
    (start $message:literal) => {
        #[cfg(feature = "flamegraph")]
        flame::start($message);
    };
    (end $message:literal) => {
        #[cfg(feature = "flamegraph")]
        flame::end($message);
    };
    (guard $message:literal) => {
        #[cfg(feature = "flamegraph")]
        let _g = flame::start_guard($message);
    };
}
