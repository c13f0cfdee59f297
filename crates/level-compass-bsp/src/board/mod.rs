const _ENABLED_FEATURES: u32 = 0 + if cfg!(feature = "dk") { 1 } else { 0 };
const _: () = if _ENABLED_FEATURES > 1 {
    panic!("At most one hardware feature may be enabled.");
};

cfg_if::cfg_if! {
    if #[cfg(feature = "dk")] {
        pub mod dk;
        pub use dk::*;
    } else {
        // By default, use the rev A board.
        pub mod rev_a;
        pub use rev_a::*;
    }
}
