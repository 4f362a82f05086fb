/// Built-in `pvdisplay -m --units M` output used by `--sample`.
///
/// Two volume groups over three disks, with split LVs and a hole of free
/// space between allocations.
pub const SAMPLE_PVDISPLAY: &str = "\
  --- Physical volume ---
  PV Name               /dev/sda2
  VG Name               vg_system
  PV Size               510415.00 MiB / not usable 2.00 MiB
  Allocatable           yes
  PE Size               4.19 MiB
  Total PE              121817
  Free PE               80857
  Allocated PE          40960
  PV UUID               q3xFdn-5kGz-1Yd2-v9Ae-Lp0q-Rc7T-8sWm2N

  --- Physical Segments ---
  Physical extent 0 to 8191:
    Logical volume\t/dev/vg_system/root
    Logical extents\t0 to 8191
  Physical extent 8192 to 10239:
    Logical volume\t/dev/vg_system/swap
    Logical extents\t0 to 2047
  Physical extent 10240 to 40959:
    Logical volume\t/dev/vg_system/home
    Logical extents\t0 to 30719
  Physical extent 40960 to 121816:
    FREE

  --- Physical volume ---
  PV Name               /dev/sdb1
  VG Name               vg_data
  PV Size               953843.00 MiB / not usable 4.00 MiB
  Allocatable           yes (but full)
  PE Size               4.19 MiB
  Total PE              227647
  Free PE               0
  Allocated PE          227647
  PV UUID               Hk9cTe-2bWq-0Lm3-Zp8R-yN4d-Fv6s-1aXo7J

  --- Physical Segments ---
  Physical extent 0 to 153599:
    Logical volume\t/dev/vg_data/media
    Logical extents\t0 to 153599
  Physical extent 153600 to 227646:
    Logical volume\t/dev/vg_data/backup
    Logical extents\t0 to 74046

  --- Physical volume ---
  PV Name               /dev/sdc1
  VG Name               vg_data
  PV Size               953843.00 MiB / not usable 4.00 MiB
  Allocatable           yes
  PE Size               4.19 MiB
  Total PE              227647
  Free PE               124223
  Allocated PE          103424
  PV UUID               Wd1sQp-7cVx-4Kt9-Rm2E-hB6n-Jy0u-5gLz3P

  --- Physical Segments ---
  Physical extent 0 to 51199:
    Logical volume\t/dev/vg_data/media
    Logical extents\t153600 to 204799
  Physical extent 51200 to 102399:
    FREE
  Physical extent 102400 to 154623:
    Logical volume\t/dev/vg_data/backup
    Logical extents\t74047 to 126270
  Physical extent 154624 to 227646:
    FREE
";
