//! Logging macros shared by the library and the firmware binary. They
//! forward to `defmt` when the feature is enabled and compile to nothing
//! otherwise.
#![allow(unused_macros)]

#[macro_export]
macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

#[macro_export]
macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::info!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

#[macro_export]
macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

#[macro_export]
macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::error!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

/// Unwraps a `Result`, logging the error before panicking.
#[macro_export]
macro_rules! unwrap {
    ($arg:expr) => {
        match $arg {
            ::core::result::Result::Ok(value) => value,
            ::core::result::Result::Err(_e) => {
                #[cfg(feature = "defmt")]
                ::defmt::panic!(
                    "unwrap of `{}` failed: {:?}",
                    ::core::stringify!($arg),
                    _e
                );
                #[cfg(not(feature = "defmt"))]
                ::core::panic!("unwrap of `{}` failed", ::core::stringify!($arg));
            }
        }
    };
}
