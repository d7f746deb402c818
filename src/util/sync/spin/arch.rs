//! Architecture-specific busy-wait hints.

cfg_if::cfg_if! {
    if #[cfg(target_arch = "x86_64")] {
        /// An optimization for busy loops.
        #[inline(always)]
        pub fn pause() {
            unsafe { core::arch::asm!("pause", options(nomem, nostack)) }
        }
    } else if #[cfg(target_arch = "aarch64")] {
        /// An optimization for busy loops.
        #[inline(always)]
        pub fn pause() {
            unsafe { core::arch::asm!("yield", options(nomem, nostack)) }
        }
    } else {
        /// An optimization for busy loops.
        #[inline(always)]
        pub fn pause() {
            core::hint::spin_loop();
        }
    }
}
