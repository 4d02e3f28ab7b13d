//! Quantified-metric prompts shown next to generated bullets, per style.

use serde::Serialize;

use crate::dictionary::Domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricSuggestion {
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub example: &'static str,
}

const fn metric(
    key: &'static str,
    label: &'static str,
    placeholder: &'static str,
    example: &'static str,
) -> MetricSuggestion {
    MetricSuggestion {
        key,
        label,
        placeholder,
        example,
    }
}

const CLOUD_METRICS: &[MetricSuggestion] = &[
    metric("availability", "可用性", "如 99.99%", "99.95%"),
    metric("scale", "并发用户数", "如 10万", "50万"),
    metric("time_before", "迁移前耗时", "如 2小时", "4小时"),
    metric("time_after", "迁移后耗时", "如 10分钟", "30分钟"),
    metric("cost_reduction", "成本降低比例", "如 30%", "25%"),
    metric("migration_count", "迁移服务数量", "如 50个", "30个"),
    metric("downtime", "停机时间", "如 5分钟", "2分钟"),
    metric("rto_time", "RTO时间", "如 30分钟", "15分钟"),
    metric("detection_time", "故障检测时间", "如 5分钟", "2分钟"),
    metric("mttr_reduction", "MTTR降低比例", "如 50%", "40%"),
    metric("response_time", "响应时间降低", "如 30%", "20%"),
    metric("scalability_increase", "扩展性提升比例", "如 200%", "150%"),
    metric("release_frequency", "发布频率提升", "如 5倍", "3倍"),
    metric("failure_rate", "故障率降低", "如 80%", "60%"),
    metric("annual_savings", "年度节省成本", "如 100万元", "50万元"),
    metric("efficiency_improvement", "效率提升比例", "如 60%", "40%"),
    metric("peak_traffic", "峰值流量", "如 100万QPS", "50万QPS"),
    metric("sla_level", "SLA等级", "如 99.99%", "99.95%"),
];

const SRE_METRICS: &[MetricSuggestion] = &[
    metric("detection_time", "故障发现时间", "如 2分钟", "5分钟"),
    metric("stability_improvement", "稳定性提升比例", "如 30%", "25%"),
    metric("efficiency_improvement", "运维效率提升", "如 50%", "40%"),
    metric("error_reduction", "人为错误减少", "如 70%", "60%"),
    metric("response_time", "P99响应时间降低", "如 100ms", "50ms"),
    metric("availability", "可用性提升至", "如 99.99%", "99.95%"),
    metric("recovery_time", "故障恢复时间缩短", "如 50%", "30%"),
    metric("mtbf_extension", "MTBF延长", "如 100小时", "50小时"),
    metric("satisfaction_improvement", "客户满意度提升", "如 20%", "15%"),
    metric("incident_reduction", "服务中断事件减少", "如 80%", "60%"),
    metric("success_rate", "发布成功率", "如 99%", "95%"),
    metric("rollback_time", "回滚时间", "如 2分钟", "5分钟"),
    metric("recurrence_reduction", "同类故障减少", "如 90%", "80%"),
    metric("diagnosis_time", "问题定位时间减少", "如 60%", "40%"),
    metric("vulnerability_reduction", "安全漏洞减少", "如 80%", "70%"),
    metric("compliance_rate", "合规审计通过率", "如 100%", "95%"),
    metric("utilization_improvement", "资源利用率提升", "如 40%", "30%"),
    metric("cost_savings", "成本节约", "如 50万元", "30万元"),
    metric("mttr_before", "MTTR之前", "如 30分钟", "60分钟"),
    metric("mttr_after", "MTTR之后", "如 5分钟", "10分钟"),
    metric("reliability_improvement", "可靠性提升", "如 40%", "30%"),
];

const MLOPS_METRICS: &[MetricSuggestion] = &[
    metric("delivery_time", "模型交付周期缩短", "如 80%", "70%"),
    metric("performance_improvement", "模型性能提升", "如 20%", "15%"),
    metric("efficiency_improvement", "特征工程效率提升", "如 60%", "50%"),
    metric("accuracy_improvement", "模型准确率提高", "如 5%", "3%"),
    metric("iteration_speed", "模型迭代速度提升", "如 3倍", "2倍"),
    metric("reproducibility_improvement", "实验复现效率提高", "如 80%", "60%"),
    metric("latency_reduction", "推理延迟降低", "如 100ms", "50ms"),
    metric("throughput_improvement", "吞吐量提升", "如 1000 QPS", "500 QPS"),
    metric("detection_time", "模型性能退化检测时间", "如 1小时", "2小时"),
    metric("maintenance_cost_reduction", "维护成本降低", "如 40%", "30%"),
    metric("success_rate", "模型上线成功率", "如 98%", "95%"),
    metric("business_improvement", "业务指标改善", "如 15%", "10%"),
    metric("quality_detection_rate", "数据质量问题发现率", "如 90%", "80%"),
    metric("development_efficiency", "模型开发效率提升", "如 50%", "40%"),
    metric("consistency_rate", "模型一致性", "如 99%", "98%"),
    metric("model_count", "支撑模型数量", "如 100个", "50个"),
    metric("availability", "服务可用性", "如 99.99%", "99.95%"),
    metric("trustworthiness_improvement", "模型可信度提升", "如 30%", "25%"),
    metric("compliance_risk_reduction", "合规风险降低", "如 80%", "70%"),
];

pub fn metric_suggestions(style: Domain) -> &'static [MetricSuggestion] {
    match style {
        Domain::Cloud => CLOUD_METRICS,
        Domain::Sre => SRE_METRICS,
        Domain::Mlops => MLOPS_METRICS,
    }
}
