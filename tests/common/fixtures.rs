//! Captured output from real hosts.

pub const UBUNTU_UNAME: &str = "Linux my-ubuntu-vm 5.15.0-88-generic #98-Ubuntu SMP Mon Oct 2 15:18:56 UTC 2023 x86_64 x86_64 x86_64 GNU/Linux\n";

pub const UBUNTU_OS_RELEASE: &str = r#"PRETTY_NAME="Ubuntu 22.04.3 LTS"
NAME="Ubuntu"
VERSION_ID="22.04"
VERSION="22.04.3 LTS (Jammy Jellyfish)"
VERSION_CODENAME=jammy
ID=ubuntu
ID_LIKE=debian
HOME_URL="https://www.ubuntu.com/"
UBUNTU_CODENAME=jammy
"#;

pub const UBUNTU_LDD: &str = "\tlinux-vdso.so.1 (0x00007ffd4b7f4000)
\tlibselinux.so.1 => /lib/x86_64-linux-gnu/libselinux.so.1 (0x00007f1e5c0a1000)
\tlibc.so.6 => /lib/x86_64-linux-gnu/libc.so.6 (0x00007f1e5be00000)
\t/lib64/ld-linux-x86-64.so.2 (0x00007f1e5c0f5000)
";

pub const UBUNTU_LIBC_BANNER: &str = "GNU C Library (Ubuntu GLIBC 2.35-0ubuntu3.1) stable release version 2.35.
Copyright (C) 2022 Free Software Foundation, Inc.
";

pub const ALPINE_UNAME: &str = "Linux alpine-build 6.1.55-0-lts #1-Alpine SMP PREEMPT_DYNAMIC Mon Sep 25 07:56:00 UTC 2023 x86_64\n";

pub const ALPINE_OS_RELEASE: &str = r#"NAME="Alpine Linux"
ID=alpine
VERSION_ID=3.18.4
PRETTY_NAME="Alpine Linux v3.18"
HOME_URL="https://alpinelinux.org/"
"#;

pub const ALPINE_LDD: &str = "\t/lib/ld-musl-x86_64.so.1 (0x7f8a1c5b4000)
\tlibc.musl-x86_64.so.1 => /lib/ld-musl-x86_64.so.1 (0x7f8a1c5b4000)
";

pub const ALPINE_LIBC_BANNER: &str = "musl libc (x86_64)
Version 1.2.4
Dynamic Program Loader
Usage: /lib/ld-musl-x86_64.so.1 [options] [--] pathname [args]
";

pub const MACOS_UNAME: &str = "Darwin builder-mac 23.1.0 Darwin Kernel Version 23.1.0: Mon Oct  9 21:28:45 PDT 2023; root:xnu-10002.41.9~6/RELEASE_ARM64_T6000 arm64\n";

pub const MACOS_SW_VERS: &str = "ProductName:\t\tmacOS\nProductVersion:\t\t14.1.1\nBuildVersion:\t\t23B81\n";

pub const CYGWIN_UNAME: &str = "CYGWIN_NT-10.0-19045 build-win 3.5.3-1.x86_64 2024-04-03 17:25 x86_64 Cygwin\n";

pub const WINDOWS_CURRENT_VERSION: &str = r"
HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\Windows NT\CurrentVersion
    SystemRoot    REG_SZ    C:\WINDOWS
    CurrentBuildNumber    REG_SZ    19045
    CurrentMajorVersionNumber    REG_DWORD    0xa
    CurrentMinorVersionNumber    REG_DWORD    0x0
    CurrentVersion    REG_SZ    6.3
    DisplayVersion    REG_SZ    22H2
    ProductName    REG_SZ    Windows 10 Pro
";

pub const WINDOWS_ENVIRONMENT: &str = r"
HKEY_LOCAL_MACHINE\SYSTEM\CurrentControlSet\Control\Session Manager\Environment
    ComSpec    REG_EXPAND_SZ    %SystemRoot%\system32\cmd.exe
    NUMBER_OF_PROCESSORS    REG_SZ    8
    OS    REG_SZ    Windows_NT
    PROCESSOR_ARCHITECTURE    REG_SZ    AMD64
";

pub const WINDOWS_COMPUTER_NAME: &str = r"
HKEY_LOCAL_MACHINE\SYSTEM\CurrentControlSet\Control\ComputerName\ComputerName
    ComputerName    REG_SZ    BUILD-WIN
";

pub const PASSWD: &str = "root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
builder:x:1000:1000:Build User,,,:/home/builder:/bin/zsh
";
