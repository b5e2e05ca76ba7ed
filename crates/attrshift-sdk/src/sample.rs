//! Demonstration view covering every legacy form the converter handles

/// Form view fragment using `attrs`, `states` and a deprecated widget
pub const SAMPLE_VIEW: &str = r#"<!-- Sample view with deprecated attrs and states -->
<button name="action_accept" type="object" string="Accept"
        attrs="{'invisible': ['|', ('state', '!=', 'pending'), ('provider_id', '!=', uid)]}"/>
<button name="action_reject" type="object" string="Reject"
        states="pending,in_progress"/>
<field name="meeting_location"
       attrs="{'invisible': [('meeting_type', '=', 'online')], 'required': [('meeting_type', '=', 'physical')]}"/>
<page string="Ratings" attrs="{'invisible': [('state', '!=', 'completed')]}"/>
<field name="description" attrs="{'readonly': [('state', 'in', ['done', 'cancelled'])]}"/>
<button name="action_validate" type="object" string="Validate"
        attrs="{'invisible': ['&amp;', ('state', '=', 'draft'), ('user_id', '!=', uid)]}"/>
<field name="message_follower_ids" widget="mail_followers"/>"#;
