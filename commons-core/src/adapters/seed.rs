//! Seed data for bootstrap and demo mode
//!
//! The bootstrap admin is the fixed recovery credential the portal is seeded
//! with on first use. Demo mode additionally populates a sample set of
//! residents and proposals: one managed building pair, one
//! building whose pending owners are orphaned, and a set of active proposals.

use chrono::{Duration, Utc};

use crate::domain::{Proposal, User, UserRole, UserStatus};

/// Fixed id of the seeded super admin
pub const ADMIN_ID: &str = "sys-admin-001";

/// Create the single SUPER_ADMIN account from the bootstrap credentials
pub fn bootstrap_admin(phone_number: &str, password: &str) -> User {
    User {
        id: ADMIN_ID.to_string(),
        name: "系统管理员".to_string(),
        role: UserRole::SuperAdmin,
        building: "物业中心".to_string(),
        unit: "Admin".to_string(),
        status: UserStatus::Verified,
        phone_number: phone_number.to_string(),
        password: password.to_string(),
        managed_building: None,
    }
}

fn demo_user(
    id: &str,
    name: &str,
    role: UserRole,
    building: &str,
    unit: &str,
    status: UserStatus,
    phone_number: &str,
    managed_building: Option<&str>,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        role,
        building: building.to_string(),
        unit: unit.to_string(),
        status,
        phone_number: phone_number.to_string(),
        password: "password".to_string(),
        managed_building: managed_building.map(str::to_string),
    }
}

/// Generate the demo resident set
///
/// Buildings 1 and 2 each have a steward; building 3 has none, so its
/// pending owners start out orphaned.
pub fn demo_users() -> Vec<User> {
    vec![
        demo_user(
            "u-b1-admin",
            "李明（1号楼管家）",
            UserRole::BuildingAdmin,
            "1号楼",
            "101",
            UserStatus::Verified,
            "13900000001",
            Some("1号楼"),
        ),
        demo_user(
            "u-b1-owner1",
            "张伟",
            UserRole::Owner,
            "1号楼",
            "305",
            UserStatus::Pending,
            "13900000002",
            None,
        ),
        demo_user(
            "u-b1-owner2",
            "王芳",
            UserRole::Owner,
            "1号楼",
            "602",
            UserStatus::Pending,
            "13900000003",
            None,
        ),
        demo_user(
            "u-b2-admin",
            "刘强（2号楼管家）",
            UserRole::BuildingAdmin,
            "2号楼",
            "202",
            UserStatus::Verified,
            "13900000004",
            Some("2号楼"),
        ),
        demo_user(
            "u-b2-owner1",
            "陈静",
            UserRole::Owner,
            "2号楼",
            "505",
            UserStatus::Pending,
            "13900000005",
            None,
        ),
        demo_user(
            "u-b3-owner1",
            "赵强（无管家）",
            UserRole::Owner,
            "3号楼",
            "808",
            UserStatus::Pending,
            "13900000006",
            None,
        ),
        demo_user(
            "u-b3-owner2",
            "孙丽",
            UserRole::Owner,
            "3号楼",
            "909",
            UserStatus::Pending,
            "13900000007",
            None,
        ),
    ]
}

/// Generate the demo proposal set, all active with zeroed counts
pub fn demo_proposals() -> Vec<Proposal> {
    let topics: &[(&str, &str)] = &[
        (
            "2024年度物业服务费用调整方案",
            "鉴于人工及物料成本上涨，拟对现有物业费标准进行微调，调整幅度为0.2元/平米。",
        ),
        (
            "地下车库增加新能源汽车充电桩",
            "计划在B2层F区增设20个国家电网标准快充桩，解决业主充电难问题。",
        ),
        (
            "小区门禁系统升级人脸识别",
            "现有刷卡门禁反应迟钝，建议全面升级为AI人脸识别系统，提升安全性与便捷性。",
        ),
        (
            "增设垃圾分类定时投放点",
            "响应政府号召，拟在3号楼北侧增设一处智能垃圾分类投放站。",
        ),
        (
            "地下车库照明节能改造工程",
            "将车库现有日光灯管全部更换为雷达感应LED灯，预计年节电40%。",
        ),
        (
            "儿童游乐区设施翻新计划",
            "中心花园儿童滑梯老化严重，存在安全隐患，申请维修基金进行整体更换。",
        ),
    ];

    let deadline = Utc::now() + Duration::days(7);
    let option_labels: Vec<String> = ["同意", "反对", "弃权"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    topics
        .iter()
        .enumerate()
        .map(|(i, (title, description))| {
            let mut p = Proposal::new(*title, *description, deadline, &option_labels, i as i64);
            p.id = format!("v-demo-{}", i);
            p
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_admin_is_verified_super_admin() {
        let admin = bootstrap_admin("18688835658", "895600");
        assert_eq!(admin.role, UserRole::SuperAdmin);
        assert_eq!(admin.status, UserStatus::Verified);
        assert_eq!(admin.id, ADMIN_ID);
    }

    #[test]
    fn test_demo_users_contain_no_super_admin() {
        assert!(demo_users()
            .iter()
            .all(|u| u.role != UserRole::SuperAdmin));
    }

    #[test]
    fn test_demo_proposals_start_clean() {
        let proposals = demo_proposals();
        assert_eq!(proposals.len(), 6);
        for p in &proposals {
            assert_eq!(p.total_votes, 0);
            assert_eq!(p.options.len(), 3);
            assert!(p.counts_consistent());
        }
    }
}
