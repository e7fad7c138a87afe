use sysinfo::{DiskKind as SysDiskKind, Disks};

use crate::error::{Error, Result};
use crate::model::{VolumeInfo, VolumeKind, VolumeUsage};

/// Every mounted volume the platform reports, sorted by mount point.
pub fn list_volumes() -> Vec<VolumeInfo> {
    let disks = Disks::new_with_refreshed_list();
    let mut volumes = disks
        .list()
        .iter()
        .map(|disk| VolumeInfo {
            name: disk.name().to_string_lossy().to_string(),
            mount_point: disk.mount_point().to_string_lossy().to_string(),
            file_system: Some(disk.file_system().to_string_lossy().to_string()),
            kind: match disk.kind() {
                SysDiskKind::SSD => VolumeKind::Ssd,
                SysDiskKind::HDD => VolumeKind::Hdd,
                _ => VolumeKind::Unknown,
            },
            is_removable: disk.is_removable(),
            total_space_bytes: disk.total_space(),
            available_space_bytes: disk.available_space(),
        })
        .collect::<Vec<_>>();
    volumes.sort_by(|a, b| a.mount_point.cmp(&b.mount_point));
    volumes
}

/// Fresh capacity figures for the volume mounted at `mount`.
pub fn volume_usage(mount: &str) -> Result<VolumeUsage> {
    list_volumes()
        .into_iter()
        .find(|volume| volume.mount_point == mount)
        .map(|volume| {
            VolumeUsage::from_capacity(volume.total_space_bytes, volume.available_space_bytes)
        })
        .ok_or_else(|| Error::VolumeNotFound {
            mount: mount.to_string(),
        })
}
