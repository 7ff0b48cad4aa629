//! Pre-built mock filesystem fixtures.
//!
//! One coherent machine state shared by collector tests and by the viewer
//! binary when it runs on a host without `/proc`.

use super::filesystem::MockFs;

impl MockFs {
    /// A small Debian-ish box, one day of uptime, three processes.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/etc/os-release",
            "\
PRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"
NAME=\"Debian GNU/Linux\"
VERSION_ID=\"12\"
VERSION=\"12 (bookworm)\"
ID=debian
HOME_URL=\"https://www.debian.org/\"
",
        );

        fs.add_file(
            "/etc/passwd",
            "\
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
nobody:x:65534:65534:nobody:/nonexistent:/usr/sbin/nologin
postgres:x:109:117:PostgreSQL Administrator:/var/lib/postgresql:/bin/bash
user:x:1000:1000:User:/home/user:/bin/bash
",
        );

        fs.add_file(
            "/proc/version",
            "Linux version 6.1.0-18-amd64 (debian-kernel@lists.debian.org) (gcc-12 (Debian 12.2.0-14) 12.2.0) #1 SMP PREEMPT_DYNAMIC Debian 6.1.76-1 (2024-02-01)\n",
        );
        fs.add_file("/proc/uptime", "86423.73 342019.42\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 5000 250 1500 40000 500 100 50 0 0 0
cpu1 5000 250 1500 40000 500 100 50 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );

        // PID 1: init, started right after boot.
        fs.add_process(
            1,
            "1 (systemd) S 0 1 1 0 -1 4194560 50000 900000 100 2000 2000 1500 8000 4000 20 0 1 0 30 175000000 3000 18446744073709551615",
            "Name:\tsystemd\nPid:\t1\nUid:\t0\t0\t0\t0\nGid:\t0\t0\t0\t0\nVmSize:\t170000 kB\nVmData:\t1024 kB\n",
            "/sbin/init\0splash\0",
        );

        // PID 4242: a database server with real CPU time on the clock.
        fs.add_process(
            4242,
            "4242 (postgres) S 1 4242 4242 0 -1 4194304 120000 0 350 0 420000 180000 2500 1500 20 0 6 0 1000000 900000000 40000 18446744073709551615",
            "Name:\tpostgres\nPid:\t4242\nUid:\t109\t109\t109\t109\nGid:\t117\t117\t117\t117\nVmSize:\t880000 kB\nVmData:\t153600 kB\n",
            "postgres\0-D\0/var/lib/postgresql/data\0",
        );

        // PID 5001: an interactive shell owned by a regular user.
        fs.add_process(
            5001,
            "5001 (bash) S 5000 5001 5001 34816 5001 4194304 5000 50000 10 20 150 80 40 20 20 0 1 0 8000000 25000000 2000 18446744073709551615",
            "Name:\tbash\nPid:\t5001\nUid:\t1000\t1000\t1000\t1000\nGid:\t1000\t1000\t1000\t1000\nVmSize:\t25000 kB\nVmData:\t3072 kB\n",
            "-bash\0",
        );

        fs
    }
}
