// Model serialization tests (snake_case keys, nulls kept, numbers stay numbers)

use sysinfo_server::models::*;

fn sample_snapshot(gpu: Vec<GpuInfo>) -> SystemSnapshot {
    SystemSnapshot {
        system: SystemInfo {
            system_name: "Linux".into(),
            node_name: "devbox".into(),
            os_release: "6.8.0".into(),
            os_version: "#1 SMP".into(),
            machine_type: "x86_64".into(),
            processor: "x86_64".into(),
        },
        cpu: CpuInfo {
            processor_name: "AMD Ryzen 7 5800X 8-Core Processor".into(),
            physical_cores: None,
            logical_cores: 16,
            cpu_frequency_mhz: 3800.0,
            cpu_usage_percent: 4.25,
        },
        memory: MemoryInfo {
            total_gb: 32.0,
            available_gb: 18.5,
            used_gb: 13.5,
            utilization_percent: 42.19,
        },
        disk: DiskInfo {
            total_gb: 931.51,
            used_gb: 400.01,
            free_gb: 531.5,
            utilization_percent: 42.94,
        },
        gpu,
    }
}

#[test]
fn test_snapshot_uses_snake_case_keys() {
    let json = serde_json::to_string(&sample_snapshot(vec![])).unwrap();
    for key in [
        "\"system_name\"",
        "\"node_name\"",
        "\"os_release\"",
        "\"os_version\"",
        "\"machine_type\"",
        "\"processor_name\"",
        "\"physical_cores\"",
        "\"logical_cores\"",
        "\"cpu_frequency_mhz\"",
        "\"cpu_usage_percent\"",
        "\"total_gb\"",
        "\"available_gb\"",
        "\"free_gb\"",
        "\"utilization_percent\"",
    ] {
        assert!(json.contains(key), "missing {key} in {json}");
    }
}

#[test]
fn test_empty_gpu_serializes_as_empty_array() {
    let json = serde_json::to_value(sample_snapshot(vec![])).unwrap();
    assert_eq!(json["gpu"], serde_json::json!([]));
}

#[test]
fn test_unknown_physical_cores_serializes_as_null() {
    let json = serde_json::to_value(sample_snapshot(vec![])).unwrap();
    let cpu = json["cpu"].as_object().unwrap();
    assert!(cpu.contains_key("physical_cores"));
    assert!(cpu["physical_cores"].is_null());
}

#[test]
fn test_gpu_info_serialization() {
    let gpu = GpuInfo {
        id: 0,
        name: "NVIDIA GeForce RTX 4090".into(),
        memory_total_mb: 24564.0,
        memory_used_mb: 1200.5,
        memory_free_mb: 23363.5,
        gpu_utilization_percent: 12.0,
        temperature_c: None,
    };
    let json = serde_json::to_value(&gpu).unwrap();
    assert_eq!(json["id"], 0);
    assert!(json["memory_used_mb"].is_f64());
    assert!(json["temperature_c"].is_null());
    let back: GpuInfo = serde_json::from_value(json).unwrap();
    assert_eq!(back, gpu);
}

#[test]
fn test_numeric_leaves_are_json_numbers() {
    let json = serde_json::to_value(sample_snapshot(vec![])).unwrap();
    for section in ["memory", "disk"] {
        for (key, value) in json[section].as_object().unwrap() {
            assert!(value.is_number(), "{section}.{key} is not a number");
        }
    }
    assert!(json["cpu"]["cpu_usage_percent"].is_number());
    assert!(json["cpu"]["logical_cores"].is_u64());
}
