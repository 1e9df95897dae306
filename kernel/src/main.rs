//! PicoKern bare-metal entry
//!
//! `_start` is placed first in `.text` by the linker script. It sets up the
//! boot stack (`__stack_top`, reserved by the linker script), zeroes
//! `__bss_start..__bss_end` and jumps into
//! [`picokern_kernel::boot::kernel_entry`].

#![no_std]
#![no_main]

use core::arch::global_asm;
use core::panic::PanicInfo;

use picokern_kernel::{boot, kprintln};

extern "C" fn rust_start() -> ! {
    boot::kernel_entry()
}

#[cfg(target_arch = "x86_64")]
global_asm!(
    ".section .text._start, \"ax\"",
    ".global _start",
    "_start:",
    "    lea rsp, [rip + __stack_top]",
    // Flat images carry no .bss
    "    lea rdi, [rip + __bss_start]",
    "    lea rcx, [rip + __bss_end]",
    "    sub rcx, rdi",
    "    xor eax, eax",
    "    cld",
    "    rep stosb",
    "    call {entry}",
    "2:",
    "    hlt",
    "    jmp 2b",
    entry = sym rust_start,
);

// Secondary cores (any non-zero affinity) are parked.
#[cfg(target_arch = "aarch64")]
global_asm!(
    ".section .text._start, \"ax\"",
    ".global _start",
    "_start:",
    "    mrs x1, mpidr_el1",
    "    and x1, x1, #0xffff",
    "    cbnz x1, 2f",
    "    ldr x1, =__stack_top",
    "    mov sp, x1",
    "    ldr x1, =__bss_start",
    "    ldr x2, =__bss_end",
    "3:",
    "    cmp x1, x2",
    "    b.hs 4f",
    "    str xzr, [x1], #8",
    "    b 3b",
    "4:",
    "    bl {entry}",
    "2:",
    "    wfe",
    "    b 2b",
    entry = sym rust_start,
);

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    kprintln!("[PANIC] {}", info);
    boot::halt()
}
