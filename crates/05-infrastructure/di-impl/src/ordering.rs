//! 模块排序
//!
//! 按模块声明的依赖关系做稳定拓扑排序，被依赖的模块排在前面。
//! 同一层级内保持发现顺序；遇到循环依赖时取发现顺序最早的剩余模块继续。

use di_abstractions::ServiceModule;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// 按依赖关系排序模块
///
/// 未出现在输入中的依赖被忽略。
pub fn order_modules(modules: &[Arc<ServiceModule>]) -> Vec<Arc<ServiceModule>> {
    let index: HashMap<&str, usize> = modules
        .iter()
        .enumerate()
        .map(|(i, module)| (module.name(), i))
        .collect();

    let dependencies: Vec<Vec<usize>> = modules
        .iter()
        .enumerate()
        .map(|(i, module)| {
            let mut deps: Vec<usize> = module
                .dependencies()
                .iter()
                .filter_map(|name| index.get(name.as_str()).copied())
                .filter(|&j| j != i)
                .collect();
            deps.sort_unstable();
            deps.dedup();
            deps
        })
        .collect();

    let mut emitted = vec![false; modules.len()];
    let mut ordered = Vec::with_capacity(modules.len());

    while ordered.len() < modules.len() {
        let ready = (0..modules.len())
            .find(|&i| !emitted[i] && dependencies[i].iter().all(|&j| emitted[j]));

        let next = match ready {
            Some(i) => i,
            None => {
                let Some(i) = (0..modules.len()).find(|&i| !emitted[i]) else {
                    break;
                };
                warn!("检测到模块循环依赖，按发现顺序处理: {}", modules[i].name());
                i
            }
        };

        emitted[next] = true;
        ordered.push(Arc::clone(&modules[next]));
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str, deps: &[&str]) -> Arc<ServiceModule> {
        let module = deps
            .iter()
            .fold(ServiceModule::new(name), |m, dep| m.depends_on(*dep));
        Arc::new(module)
    }

    fn names(modules: &[Arc<ServiceModule>]) -> Vec<&str> {
        modules.iter().map(|m| m.name()).collect()
    }

    #[test]
    fn test_dependencies_come_first() {
        let modules = vec![
            module("compute", &["identity", "network"]),
            module("network", &["identity"]),
            module("identity", &[]),
        ];

        let ordered = order_modules(&modules);
        assert_eq!(names(&ordered), vec!["identity", "network", "compute"]);
    }

    #[test]
    fn test_independent_modules_keep_discovery_order() {
        let modules = vec![
            module("object-store", &[]),
            module("block-storage", &[]),
            module("dns", &["missing"]),
        ];

        let ordered = order_modules(&modules);
        assert_eq!(names(&ordered), vec!["object-store", "block-storage", "dns"]);
    }

    #[test]
    fn test_cycle_is_broken_deterministically() {
        let modules = vec![
            module("a", &["b"]),
            module("b", &["a"]),
            module("c", &["a"]),
        ];

        let first = order_modules(&modules);
        let second = order_modules(&modules);

        assert_eq!(names(&first), vec!["a", "b", "c"]);
        assert_eq!(names(&first), names(&second));
    }
}
