//! Fixed values of the `work_order_list` DocType.

/// The DocType holding work orders.
pub const DOCTYPE: &str = "work_order_list";

/// Fields requested for the projects table.
pub const LIST_FIELDS: [&str; 10] = [
    "name",
    "wo_num1",
    "company",
    "acc_name1",
    "job_type1",
    "district_name",
    "create_date1",
    "workflow_state",
    "work_order_status1",
    "modified",
];

/// Maximum number of work orders fetched for the table.
pub const LIST_LIMIT: usize = 100;

/// Child table with the line items of a work order.
pub const ITEMS_FIELD: &str = "work_items_details1";

/// Status every new work order starts in.
pub const INITIAL_STATUS: &str = "تم استلام الطلب";

/// Company preselected on the create form.
pub const DEFAULT_COMPANY: &str = "مؤسسة قساور";

/// Work order status options, in workflow order.
pub const STATUS_OPTIONS: [&str; 14] = [
    "تم استلام الطلب",
    "تمت اصدار الرخصة",
    "اجراءات اصدار الرخص",
    "تحت التنفيذ",
    "انتظار صرف المواد",
    "اكتمل /لم يتم الصرف",
    "اكتمل /تم الصرف",
    "مكتمل",
    "مستلم امر عمل",
    "اصدار شهادة انجاز",
    "اصدار مستخلص",
    "غير مدفوع",
    "مدفوع",
    "ملغي",
];

/// Job type options.
pub const JOB_TYPE_OPTIONS: [&str; 4] = ["بناء", "هدم", "صيانة", "تطوير"];

/// Base name of export files.
pub const EXPORT_BASENAME: &str = "work_orders";

pub fn is_known_status(status: &str) -> bool {
    STATUS_OPTIONS.contains(&status)
}

pub fn is_known_job_type(job_type: &str) -> bool {
    JOB_TYPE_OPTIONS.contains(&job_type)
}

// =============================================================================
// User-facing messages
// =============================================================================

pub mod messages {
    pub const WO_NUM_REQUIRED: &str = "رقم الطلب مطلوب";
    pub const CUSTOMER_REQUIRED: &str = "اسم المشتري مطلوب";
    pub const ITEM_REQUIRED: &str = "يجب إضافة بند واحد على الأقل";
    pub const UNKNOWN_STATUS: &str = "حالة غير معروفة";
    pub const UNKNOWN_JOB_TYPE: &str = "نوع عمل غير معروف";
    pub const INVALID_ITEM: &str = "صيغة البند غير صحيحة";
    pub const INVALID_DATE: &str = "تاريخ غير صحيح";
    pub const NOTHING_TO_UPDATE: &str = "لا توجد تغييرات للحفظ";
    pub const SAVE_FAILED: &str = "حدث خطأ أثناء حفظ البيانات";

    pub const LOGIN_SUCCESS: &str = "تم تسجيل الدخول بنجاح";
    pub const LOGIN_FAILED: &str = "فشل تسجيل الدخول";
    pub const LOGOUT_SUCCESS: &str = "تم تسجيل الخروج";
    pub const LOGIN_REQUIRED: &str = "يجب تسجيل الدخول أولاً";
    pub const SESSION_EXPIRED: &str = "انتهت صلاحية الجلسة";

    pub const PERMISSION_ERROR: &str = "خطأ في الصلاحيات";
    pub const FETCH_FAILED: &str = "حدث خطأ أثناء جلب المشاريع";
    pub const CREATE_SUCCESS: &str = "تم إنشاء المشروع بنجاح";
    pub const CREATE_FAILED: &str = "حدث خطأ أثناء إنشاء المشروع";
    pub const UPDATE_SUCCESS: &str = "تم تحديث المشروع بنجاح";
    pub const DELETE_SUCCESS: &str = "تم حذف المشروع بنجاح";
    pub const DELETE_FAILED: &str = "حدث خطأ أثناء حذف المشروع";
    pub const EXPORT_SUCCESS: &str = "تم تصدير البيانات بنجاح";
    pub const EXPORT_FAILED: &str = "حدث خطأ أثناء تصدير البيانات";
    pub const NO_SELECTION: &str = "لم يتم تحديد أي مشروع";
    pub const UNKNOWN_ERROR: &str = "خطأ غير معروف";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_is_an_option() {
        assert!(is_known_status(INITIAL_STATUS));
        assert_eq!(STATUS_OPTIONS[0], INITIAL_STATUS);
        assert!(!is_known_status("pending"));
        assert!(is_known_job_type("صيانة"));
    }
}
